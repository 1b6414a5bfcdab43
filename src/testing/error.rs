//! Failure and result types for fixture verification.

use std::path::PathBuf;

use thiserror::Error;

use super::expectation::ParseError;

/// One mismatch between expected and actual findings.
#[derive(Debug, Clone)]
pub enum ExpectationFailure {
    /// An expected finding was not produced.
    Missing { line: u32, alias: String, root: String },
    /// A finding was produced on a line with no expectation.
    Unexpected { line: u32, alias: String, root: String },
    /// A finding was produced but names the wrong variables.
    WrongNames {
        line: u32,
        expected_alias: String,
        expected_root: String,
        alias: String,
        root: String,
    },
}

impl std::fmt::Display for ExpectationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpectationFailure::Missing { line, alias, root } => write!(
                f,
                "line {}: expected finding `{} <- {}`, but none was produced",
                line, alias, root
            ),
            ExpectationFailure::Unexpected { line, alias, root } => write!(
                f,
                "line {}: unexpected finding `{} <- {}`",
                line, alias, root
            ),
            ExpectationFailure::WrongNames {
                line,
                expected_alias,
                expected_root,
                alias,
                root,
            } => write!(
                f,
                "line {}: expected `{} <- {}`, got `{} <- {}`",
                line, expected_alias, expected_root, alias, root
            ),
        }
    }
}

/// Result of verifying a single fixture function.
#[derive(Debug)]
pub struct FnTestResult {
    pub name: String,
    pub failures: Vec<ExpectationFailure>,
}

impl FnTestResult {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Result of verifying a whole fixture file.
#[derive(Debug)]
pub struct FileTestResult {
    pub path: PathBuf,
    pub functions: Vec<FnTestResult>,
}

impl FileTestResult {
    pub fn passed(&self) -> bool {
        self.functions.iter().all(|f| f.passed())
    }

    pub fn pass_count(&self) -> usize {
        self.functions.iter().filter(|f| f.passed()).count()
    }

    pub fn fail_count(&self) -> usize {
        self.functions.len() - self.pass_count()
    }
}

impl std::fmt::Display for FileTestResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.path.display())?;
        for func in &self.functions {
            if func.passed() {
                writeln!(f, "  \u{2713} {}", func.name)?;
            } else {
                writeln!(f, "  \u{2717} {}", func.name)?;
                for failure in &func.failures {
                    writeln!(f, "      {}", failure)?;
                }
            }
        }
        Ok(())
    }
}

/// Error preventing verification from running at all. Test failures are not
/// errors; they come back inside [`FileTestResult`].
#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("failed to read fixture: {0}")]
    Io(#[from] std::io::Error),
    #[error("expectation parse errors: {}", format_parse_errors(.0))]
    ParseErrors(Vec<ParseError>),
}

fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
