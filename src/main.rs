use anyhow::{Context, Result};
use bpaf::Bpaf;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vecalias::analysis::{check_source, HeuristicOracle, SemanticOracle, SemanticResult};
use vecalias::output::{render, RenderFormat};

/// Output format for findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Format {
    #[default]
    Human,
    Short,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(Format::Human),
            "short" => Ok(Format::Short),
            _ => Err(format!("unknown format '{}'; expected: human, short", s)),
        }
    }
}

impl From<Format> for RenderFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Human => RenderFormat::Human,
            Format::Short => RenderFormat::Short,
        }
    }
}

#[derive(Debug, Clone, Bpaf)]
#[bpaf(options, version, fallback_to_usage)]
/// Warns when aliased vectors with unknown spare capacity are independently appended to
///
/// Exits with status 1 when any finding is reported.
struct Opts {
    /// Skip the rust-analyzer type oracle and rely on syntax heuristics only
    #[bpaf(long)]
    syntax_only: bool,

    /// Output format [human (default), short]
    #[bpaf(short, long, argument("FORMAT"), fallback(Format::default()))]
    format: Format,

    /// Rust source file to check
    #[bpaf(positional("FILE"))]
    file: PathBuf,
}

fn main() -> Result<()> {
    let opts = opts().run();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let source = fs::read_to_string(&opts.file)
        .with_context(|| format!("failed to read {}", opts.file.display()))?;

    let diagnostics = if opts.syntax_only {
        check_source(&source, &HeuristicOracle)
    } else {
        match SemanticOracle::load(&opts.file) {
            SemanticResult::Available(oracle) => check_source(&source, &oracle),
            SemanticResult::NotCargoProject => {
                tracing::info!("not inside a cargo project; using syntax heuristics");
                check_source(&source, &HeuristicOracle)
            }
            SemanticResult::LoadFailed => {
                tracing::warn!("semantic load failed; falling back to syntax heuristics");
                check_source(&source, &HeuristicOracle)
            }
        }
    };

    print!("{}", render(&opts.file, &source, &diagnostics, opts.format.into()));

    if !diagnostics.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}
