//! Capacity classification for vector-producing expressions.
//!
//! Every defining expression of a growable vector either confirms that the
//! value has zero spare capacity (the next growth reallocates), confirms
//! that headroom was reserved, or tells us nothing. The classifier below is
//! the single source of truth for that decision; the checker never inspects
//! constructor arguments itself.

/// Capacity knowledge for a vector variable.
///
/// "Unknown" follows the reference tool's vocabulary: the value is confirmed
/// to have no spare headroom, so the next growth operation's reallocation is
/// certain. Absence of any state (`Option::None`) means unclassified, and
/// the checker stays silent for unclassified roots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityState {
    /// Zero spare capacity: freshly empty, no reserved backing store.
    Unknown,
    /// Confirmed nonzero spare capacity (or cap == len > 0, treated as safe).
    Known,
}

/// A size argument of a capacity-constructing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeArg {
    /// Integer literal with this value.
    Literal(u64),
    /// Anything else: a variable, an expression, a call.
    Dynamic,
}

/// Structured description of a vector-producing expression.
///
/// The syntax layer reduces `Vec::new()`, `vec![..]`, `Vec::with_capacity(..)`
/// and uninitialized declarations to one of these shapes; everything it does
/// not recognize simply never reaches the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtorShape {
    /// `vec![]` or `Vec::new()`: zero elements, nothing reserved.
    Empty,
    /// `let v: Vec<T>;` with no initializer.
    Uninit,
    /// `vec![elem; len]`: length-only construction, capacity equals length.
    Repeat { len: SizeArg },
    /// `Vec::with_capacity(cap)`: zero length, explicit reservation.
    Reserved { cap: SizeArg },
}

/// The decision table. Returns `None` for shapes that stay unclassified.
pub fn classify(shape: CtorShape) -> Option<CapacityState> {
    use CapacityState::{Known, Unknown};
    use SizeArg::{Dynamic, Literal};

    match shape {
        CtorShape::Empty | CtorShape::Uninit => Some(Unknown),

        CtorShape::Repeat { len: Literal(0) } => Some(Unknown),
        CtorShape::Repeat { len: Literal(_) } => Some(Known),
        CtorShape::Repeat { len: Dynamic } => None,

        CtorShape::Reserved { cap: Literal(0) } => Some(Unknown),
        CtorShape::Reserved { cap: Literal(_) } => Some(Known),
        CtorShape::Reserved { cap: Dynamic } => None,
    }
}

/// Parse an integer literal text into a [`SizeArg`].
///
/// Accepts underscores and the usual integer suffixes (`0`, `1_000`,
/// `4usize`). Non-integer text is `Dynamic`.
pub fn size_arg_from_literal(text: &str) -> SizeArg {
    let digits: String = text
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '_')
        .filter(|c| *c != '_')
        .collect();

    if digits.is_empty() {
        return SizeArg::Dynamic;
    }
    // The remainder must be a type suffix, not e.g. a float fraction.
    let rest = &text[text
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit() || *c == '_')
        .map(|(i, c)| i + c.len_utf8())
        .last()
        .unwrap_or(0)..];
    let suffix_ok = matches!(
        rest,
        "" | "u8" | "u16" | "u32" | "u64" | "u128" | "usize" | "i8" | "i16"
            | "i32" | "i64" | "i128" | "isize"
    );
    if !suffix_ok {
        return SizeArg::Dynamic;
    }

    match digits.parse::<u64>() {
        Ok(v) => SizeArg::Literal(v),
        Err(_) => SizeArg::Dynamic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CapacityState::{Known, Unknown};
    use SizeArg::{Dynamic, Literal};

    #[test]
    fn test_classification_table() {
        let cases: &[(CtorShape, Option<CapacityState>)] = &[
            (CtorShape::Empty, Some(Unknown)),
            (CtorShape::Uninit, Some(Unknown)),
            (CtorShape::Repeat { len: Literal(0) }, Some(Unknown)),
            (CtorShape::Repeat { len: Literal(1) }, Some(Known)),
            (CtorShape::Repeat { len: Literal(100) }, Some(Known)),
            (CtorShape::Repeat { len: Dynamic }, None),
            (CtorShape::Reserved { cap: Literal(0) }, Some(Unknown)),
            (CtorShape::Reserved { cap: Literal(1) }, Some(Known)),
            (CtorShape::Reserved { cap: Literal(4096) }, Some(Known)),
            (CtorShape::Reserved { cap: Dynamic }, None),
        ];

        for &(shape, expected) in cases {
            assert_eq!(classify(shape), expected, "shape: {:?}", shape);
        }
    }

    #[test]
    fn test_size_arg_parsing() {
        assert_eq!(size_arg_from_literal("0"), Literal(0));
        assert_eq!(size_arg_from_literal("42"), Literal(42));
        assert_eq!(size_arg_from_literal("1_000"), Literal(1000));
        assert_eq!(size_arg_from_literal("8usize"), Literal(8));
        assert_eq!(size_arg_from_literal("16u32"), Literal(16));

        assert_eq!(size_arg_from_literal("n"), Dynamic);
        assert_eq!(size_arg_from_literal("len()"), Dynamic);
        assert_eq!(size_arg_from_literal("0.5"), Dynamic);
        assert_eq!(size_arg_from_literal(""), Dynamic);
    }
}
