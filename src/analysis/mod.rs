//! Core divergence analysis.
//!
//! - `capacity`: the constructor classification table
//! - `context`: per-function alias edges and capacity tags
//! - `checker`: the single-pass traversal
//! - `oracle`: the growable-type query surface (+ syntax-only fallback)
//! - `semantic`: rust-analyzer-backed oracle

mod capacity;
mod checker;
mod context;
mod oracle;
mod semantic;

pub use capacity::{classify, CapacityState, CtorShape, SizeArg};
pub use checker::{check_file, check_source};
pub use context::FnContext;
pub use oracle::{is_growable_type, GrowableOracle, HeuristicOracle};
pub use semantic::{SemanticOracle, SemanticResult};
