//! vecalias: warns when aliased vectors with unknown spare capacity are
//! independently appended to.
//!
//! Two variables holding "the same" vector can silently diverge: if the
//! shared value has no spare capacity, growing it through one name
//! reallocates a fresh backing store while the other name keeps the old
//! one. This crate runs a single function-local pass over the syntax tree,
//! tracking direct identifier-to-identifier aliases and the capacity state
//! of vector constructors, and reports each growth call through an alias
//! whose root is confirmed to have zero spare capacity.
//!
//! The analysis is a deliberate heuristic: name-keyed, flow-insensitive,
//! intra-procedural, and silent whenever it is not confident.

pub mod analysis;
pub mod output;
pub mod testing;
pub mod util;

pub use analysis::{
    check_file, check_source, CapacityState, FnContext, GrowableOracle, HeuristicOracle,
    SemanticOracle, SemanticResult,
};
pub use output::{render, Diagnostic, RenderFormat};
pub use util::{offset_to_line_col, LineCol};
