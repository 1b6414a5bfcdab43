//! Renderers for divergence findings.
//!
//! Two styles: `short` prints one `path:line:col` line per finding, `human`
//! prints a rustc-style snippet with the source line and a caret underline.

use std::fmt::Write as _;
use std::path::Path;

use super::diagnostic::Diagnostic;
use crate::util::{line_text, offset_to_line_col};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderFormat {
    #[default]
    Human,
    Short,
}

/// Render all findings for one file.
pub fn render(
    path: &Path,
    source: &str,
    diagnostics: &[Diagnostic],
    format: RenderFormat,
) -> String {
    match format {
        RenderFormat::Short => render_short(path, source, diagnostics),
        RenderFormat::Human => render_human(path, source, diagnostics),
    }
}

fn render_short(path: &Path, source: &str, diagnostics: &[Diagnostic]) -> String {
    let mut out = String::new();
    for d in diagnostics {
        let pos = offset_to_line_col(source, d.range.start().into());
        let _ = writeln!(
            out,
            "{}:{}:{}: warning: {}",
            path.display(),
            pos.line,
            pos.col,
            d.message
        );
    }
    out
}

fn render_human(path: &Path, source: &str, diagnostics: &[Diagnostic]) -> String {
    let mut out = String::new();
    for d in diagnostics {
        let pos = offset_to_line_col(source, d.range.start().into());
        let line = line_text(source, pos.line);
        let gutter = pos.line.to_string().len().max(2);

        let _ = writeln!(out, "warning: {}", d.message);
        let _ = writeln!(
            out,
            "{:>width$}--> {}:{}:{}",
            "",
            path.display(),
            pos.line,
            pos.col,
            width = gutter
        );
        let _ = writeln!(out, "{:>width$} |", "", width = gutter);
        let _ = writeln!(out, "{:>width$} | {}", pos.line, line, width = gutter);

        // Underline the call, clamped to the end of its first line.
        let col = pos.col.saturating_sub(1) as usize;
        let len: usize = d.range.len().into();
        let available = line.chars().count().saturating_sub(col);
        let underline = len.min(available).max(1);
        let _ = writeln!(
            out,
            "{:>width$} | {}{}",
            "",
            " ".repeat(col),
            "^".repeat(underline),
            width = gutter
        );
        let _ = writeln!(out, "{:>width$} |", "", width = gutter);
    }

    if !diagnostics.is_empty() {
        let noun = if diagnostics.len() == 1 {
            "warning"
        } else {
            "warnings"
        };
        let _ = writeln!(out, "{} {} emitted", diagnostics.len(), noun);
    }
    out
}
