//! Small shared utilities.

mod position;

pub use position::{line_text, offset_to_line_col, LineCol};
