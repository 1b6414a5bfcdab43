//! The finding reported at an offending growth call.

use ra_ap_syntax::TextRange;

/// A positioned divergence finding.
///
/// One per offending call site, streamed in traversal order. There are no
/// severity levels and no suppression mechanism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Range of the growth call expression.
    pub range: TextRange,
    /// The variable the growth goes through.
    pub alias: String,
    /// The resolved root of the alias chain.
    pub root: String,
    /// Rendered message, fixed template.
    pub message: String,
}

impl Diagnostic {
    pub fn divergence(range: TextRange, alias: &str, root: &str) -> Self {
        Self {
            range,
            alias: alias.to_string(),
            root: root.to_string(),
            message: format!(
                "append to alias `{}` of unknown-capacity vector `{}` may cause memory divergence",
                alias, root
            ),
        }
    }
}
