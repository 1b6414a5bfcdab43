//! Type oracle surface: is an expression's static type a growable vector?
//!
//! The checker only ever asks this one question, through the trait below.
//! The semantic backend (rust-analyzer, see `semantic.rs`) answers the
//! positional query; the heuristic fallback answers only the textual one.
//! `None` means "no type information" and the caller skips the expression.

use ra_ap_syntax::TextSize;

/// Query surface mapping expressions to "is this a growable vector?".
pub trait GrowableOracle {
    /// Check the static type of the expression at this position.
    fn is_growable_at(&self, offset: TextSize) -> Option<bool>;

    /// Check a type as spelled in source (annotation text).
    fn is_type_growable(&self, type_name: &str) -> Option<bool>;
}

/// Check if a type string spells a growable vector type.
pub fn is_growable_type(ty: &str) -> bool {
    let ty = ty.trim();
    ty.starts_with("Vec<")
        || ty.starts_with("std::vec::Vec<")
        || ty.starts_with("alloc::vec::Vec<")
        || ty.starts_with("vec::Vec<")
        || ty == "Vec"
}

/// Syntax-only oracle, used when no cargo workspace is available.
///
/// It cannot answer positional queries; the checker then falls back to
/// shape- and context-based hints.
pub struct HeuristicOracle;

impl GrowableOracle for HeuristicOracle {
    fn is_growable_at(&self, _offset: TextSize) -> Option<bool> {
        None
    }

    fn is_type_growable(&self, type_name: &str) -> Option<bool> {
        Some(is_growable_type(type_name))
    }
}
