//! Expectation parsing for divergence-finding tests.
//!
//! Fixture files state expected findings in `//~` comments on the line of
//! the offending call:
//!
//! ```text
//! b.push(2); //~ diverge: b <- a
//! //~^ diverge: b <- a            (applies to the line above)
//! ```
//!
//! `b` is the alias the growth goes through, `a` the resolved root. A line
//! without an expectation must produce no finding.
//!
//! Comments are taken from the COMMENT tokens of the real syntax tree, so
//! line numbers always match what the checker sees.

use std::collections::HashMap;

use ra_ap_syntax::{Edition, SourceFile, SyntaxKind, SyntaxToken};
use thiserror::Error;

/// A single expected finding parsed from a `//~` comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectation {
    /// Expected alias name (the growth target).
    pub alias: String,
    /// Expected root name.
    pub root: String,
    /// 1-indexed line the finding must appear on.
    pub line: u32,
    /// Original comment text, for error messages.
    pub raw: String,
}

#[derive(Debug, Clone, Error)]
pub enum ParseError {
    #[error("line {line}: malformed expectation: '{text}' (want `diverge: alias <- root`)")]
    Malformed { line: u32, text: String },
    #[error("line {line}: unknown expectation kind '{kind}'")]
    UnknownKind { line: u32, kind: String },
}

/// All expectations in a fixture file, grouped by line.
#[derive(Debug, Default)]
pub struct ExpectationSet {
    /// 1-indexed line -> expected findings on that line.
    pub by_line: HashMap<u32, Vec<Expectation>>,
}

impl ExpectationSet {
    /// Parse every `//~` comment in the source.
    pub fn parse(source: &str) -> (Self, Vec<ParseError>) {
        let mut set = ExpectationSet::default();
        let mut errors = Vec::new();

        let parse = SourceFile::parse(source, Edition::Edition2021);
        let syntax = parse.syntax_node();

        for token in syntax
            .descendants_with_tokens()
            .filter_map(|it| it.into_token())
        {
            if !is_expectation_comment(&token) {
                continue;
            }

            let text = token.text();
            let line = byte_offset_to_line(source, token.text_range().start().into());

            let after_marker = &text[3..];
            let (target_line, body) = apply_line_offset(after_marker, line);

            match parse_expectation(body.trim(), target_line) {
                Ok(exp) => set.by_line.entry(target_line).or_default().push(exp),
                Err(e) => errors.push(e),
            }
        }

        (set, errors)
    }

    pub fn get(&self, line: u32) -> &[Expectation] {
        self.by_line.get(&line).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.by_line.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_line.values().map(Vec::len).sum()
    }
}

fn is_expectation_comment(token: &SyntaxToken) -> bool {
    token.kind() == SyntaxKind::COMMENT && token.text().starts_with("//~")
}

/// Convert a byte offset to a 1-indexed line number.
fn byte_offset_to_line(source: &str, offset: usize) -> u32 {
    source[..offset.min(source.len())]
        .chars()
        .filter(|&c| c == '\n')
        .count() as u32
        + 1
}

/// `^` markers move the expectation to earlier lines.
fn apply_line_offset(text: &str, current_line: u32) -> (u32, &str) {
    let trimmed = text.trim_start();
    let carets = trimmed.chars().take_while(|&c| c == '^').count();
    if carets > 0 {
        (current_line.saturating_sub(carets as u32), &trimmed[carets..])
    } else {
        (current_line, trimmed)
    }
}

/// Parse `diverge: alias <- root`.
fn parse_expectation(text: &str, line: u32) -> Result<Expectation, ParseError> {
    let Some((kind, rest)) = text.split_once(':') else {
        return Err(ParseError::Malformed {
            line,
            text: text.to_string(),
        });
    };

    let kind = kind.trim();
    if kind != "diverge" {
        return Err(ParseError::UnknownKind {
            line,
            kind: kind.to_string(),
        });
    }

    let Some((alias, root)) = rest.split_once("<-") else {
        return Err(ParseError::Malformed {
            line,
            text: text.to_string(),
        });
    };

    let alias = alias.trim();
    let root = root.trim();
    if alias.is_empty() || root.is_empty() {
        return Err(ParseError::Malformed {
            line,
            text: text.to_string(),
        });
    }

    Ok(Expectation {
        alias: alias.to_string(),
        root: root.to_string(),
        line,
        raw: text.to_string(),
    })
}
