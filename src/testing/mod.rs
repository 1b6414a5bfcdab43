//! Test infrastructure for divergence-finding fixtures.
//!
//! Expected findings are embedded in the fixture source with `//~` comments
//! (see [`expectation`]); each top-level function is one test case. The
//! harness runs the checker with the heuristic oracle, so fixtures need no
//! cargo workspace behind them.
//!
//! ```rust,ignore
//! let result = vecalias::testing::verify_file(&path)?;
//! assert!(result.passed(), "{}", result);
//! ```

pub mod error;
pub mod expectation;

pub use error::{ExpectationFailure, FileTestResult, FnTestResult, VerificationError};
pub use expectation::{Expectation, ExpectationSet, ParseError};

use std::path::Path;

use ra_ap_syntax::ast::{self, HasModuleItem, HasName};
use ra_ap_syntax::{AstNode, Edition, SourceFile};

use crate::analysis::{check_source, HeuristicOracle};
use crate::output::Diagnostic;

/// A fixture function discovered in a file: one test case.
#[derive(Debug)]
pub struct FnTestCase {
    pub name: String,
    /// 1-indexed line range, inclusive.
    pub line_range: (u32, u32),
}

/// Find all top-level functions in a fixture file.
pub fn discover_test_functions(source: &str) -> Vec<FnTestCase> {
    let parse = SourceFile::parse(source, Edition::Edition2021);
    let file = parse.tree();

    let mut cases = Vec::new();
    for item in file.items() {
        if let ast::Item::Fn(func) = item {
            if let Some(name) = func.name() {
                let range = func.syntax().text_range();
                let start = byte_offset_to_line(source, range.start().into());
                let end = byte_offset_to_line(source, range.end().into());
                cases.push(FnTestCase {
                    name: name.text().to_string(),
                    line_range: (start, end),
                });
            }
        }
    }
    cases
}

/// Verify the `//~` expectations in a fixture file on disk.
pub fn verify_file(path: &Path) -> Result<FileTestResult, VerificationError> {
    let source = std::fs::read_to_string(path)?;
    verify_source(path, &source)
}

/// Verify the `//~` expectations in fixture source.
///
/// Runs the checker once over the whole file, then compares per function:
/// every expectation must be matched by a finding on its line with the same
/// alias/root pair, and every finding must be covered by an expectation.
pub fn verify_source(path: &Path, source: &str) -> Result<FileTestResult, VerificationError> {
    let (expectations, parse_errors) = ExpectationSet::parse(source);
    if !parse_errors.is_empty() {
        return Err(VerificationError::ParseErrors(parse_errors));
    }

    let diagnostics = check_source(source, &HeuristicOracle);
    let located: Vec<(u32, &Diagnostic)> = diagnostics
        .iter()
        .map(|d| (byte_offset_to_line(source, d.range.start().into()), d))
        .collect();

    let mut functions = Vec::new();
    for case in discover_test_functions(source) {
        let (start, end) = case.line_range;
        let mut failures = Vec::new();

        // Findings inside this function, by line; consumed as they match.
        let mut found: Vec<(u32, &Diagnostic, bool)> = located
            .iter()
            .filter(|(line, _)| *line >= start && *line <= end)
            .map(|&(line, d)| (line, d, false))
            .collect();

        for line in start..=end {
            for exp in expectations.get(line) {
                match found.iter_mut().find(|(l, _, used)| *l == line && !*used) {
                    Some((_, d, used)) => {
                        *used = true;
                        if d.alias != exp.alias || d.root != exp.root {
                            failures.push(ExpectationFailure::WrongNames {
                                line,
                                expected_alias: exp.alias.clone(),
                                expected_root: exp.root.clone(),
                                alias: d.alias.clone(),
                                root: d.root.clone(),
                            });
                        }
                    }
                    None => failures.push(ExpectationFailure::Missing {
                        line,
                        alias: exp.alias.clone(),
                        root: exp.root.clone(),
                    }),
                }
            }
        }

        for (line, d, used) in &found {
            if !*used {
                failures.push(ExpectationFailure::Unexpected {
                    line: *line,
                    alias: d.alias.clone(),
                    root: d.root.clone(),
                });
            }
        }

        failures.sort_by_key(failure_line);
        functions.push(FnTestResult {
            name: case.name,
            failures,
        });
    }

    Ok(FileTestResult {
        path: path.to_path_buf(),
        functions,
    })
}

fn failure_line(failure: &ExpectationFailure) -> u32 {
    match failure {
        ExpectationFailure::Missing { line, .. }
        | ExpectationFailure::Unexpected { line, .. }
        | ExpectationFailure::WrongNames { line, .. } => *line,
    }
}

/// Convert a byte offset to a 1-indexed line number.
fn byte_offset_to_line(source: &str, offset: usize) -> u32 {
    source[..offset.min(source.len())]
        .chars()
        .filter(|&c| c == '\n')
        .count() as u32
        + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_discover_functions() {
        let cases = discover_test_functions("fn one() {}\n\nfn two() {\n}\n");
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].name, "one");
        assert_eq!(cases[1].name, "two");
        assert_eq!(cases[1].line_range, (3, 4));
    }

    #[test]
    fn test_matching_expectation_passes() {
        let source = r#"
fn f() {
    let mut a: Vec<i32> = vec![];
    let mut b = a;
    b.push(1); //~ diverge: b <- a
}
"#;
        let result = verify_source(&PathBuf::from("inline.rs"), source).unwrap();
        assert!(result.passed(), "{}", result);
    }

    #[test]
    fn test_missing_finding_fails() {
        let source = r#"
fn f() {
    let mut a = Vec::with_capacity(10);
    let mut b = a;
    b.push(1); //~ diverge: b <- a
}
"#;
        let result = verify_source(&PathBuf::from("inline.rs"), source).unwrap();
        assert!(!result.passed());
        assert!(matches!(
            result.functions[0].failures[0],
            ExpectationFailure::Missing { .. }
        ));
    }

    #[test]
    fn test_unexpected_finding_fails() {
        let source = r#"
fn f() {
    let mut a: Vec<i32> = vec![];
    let mut b = a;
    b.push(1);
}
"#;
        let result = verify_source(&PathBuf::from("inline.rs"), source).unwrap();
        assert!(!result.passed());
        assert!(matches!(
            result.functions[0].failures[0],
            ExpectationFailure::Unexpected { line: 5, .. }
        ));
    }

    #[test]
    fn test_wrong_names_fail() {
        let source = r#"
fn f() {
    let mut a: Vec<i32> = vec![];
    let mut b = a;
    let mut c = b;
    c.push(1); //~ diverge: c <- b
}
"#;
        let result = verify_source(&PathBuf::from("inline.rs"), source).unwrap();
        assert!(!result.passed());
        assert!(matches!(
            result.functions[0].failures[0],
            ExpectationFailure::WrongNames { .. }
        ));
    }
}
