//! Finding type and renderers.

mod diagnostic;
mod render;

pub use diagnostic::Diagnostic;
pub use render::{render, RenderFormat};
