//! rust-analyzer-backed type oracle.
//!
//! When the file under analysis lives in a cargo project, this loads the
//! workspace and answers positional "is this a `Vec`?" queries through
//! hover type extraction. Outside a cargo project the driver falls back to
//! the syntax-only heuristic oracle.

use std::path::{Path, PathBuf};

use ra_ap_ide::{
    AnalysisHost, FileId, FileRange, HoverConfig, HoverDocFormat, HoverResult, SubstTyLen,
};
use ra_ap_load_cargo::{load_workspace_at, LoadCargoConfig, ProcMacroServerChoice};
use ra_ap_project_model::CargoConfig;
use ra_ap_syntax::{TextRange, TextSize};
use ra_ap_vfs::Vfs;

use super::oracle::{is_growable_type, GrowableOracle};

/// Result of attempting to load the semantic backend.
pub enum SemanticResult {
    /// Workspace loaded; positional type queries available.
    Available(SemanticOracle),
    /// No enclosing Cargo.toml; caller should use the heuristic oracle.
    NotCargoProject,
    /// Workspace load failed (already logged).
    LoadFailed,
}

/// Growable-type oracle backed by a loaded rust-analyzer workspace.
pub struct SemanticOracle {
    host: AnalysisHost,
    vfs: Vfs,
    file_id: Option<FileId>,
}

impl SemanticOracle {
    /// Try to load the cargo workspace enclosing `file_path`.
    pub fn load(file_path: &Path) -> SemanticResult {
        let Some(manifest) = find_manifest(file_path) else {
            return SemanticResult::NotCargoProject;
        };

        tracing::info!("loading cargo workspace from {}", manifest.display());

        let cargo_config = CargoConfig::default();
        let load_config = LoadCargoConfig {
            load_out_dirs_from_check: false,
            with_proc_macro_server: ProcMacroServerChoice::None,
            prefill_caches: false,
        };

        match load_workspace_at(&manifest, &cargo_config, &load_config, &|_| {}) {
            Ok((db, vfs, _)) => {
                let host = AnalysisHost::with_database(db);
                let mut oracle = SemanticOracle {
                    host,
                    vfs,
                    file_id: None,
                };
                oracle.set_file(file_path);
                SemanticResult::Available(oracle)
            }
            Err(e) => {
                tracing::warn!("failed to load workspace: {}", e);
                SemanticResult::LoadFailed
            }
        }
    }

    /// Point positional queries at this file. Returns false if the file is
    /// not part of the loaded workspace.
    pub fn set_file(&mut self, path: &Path) -> bool {
        let Ok(canonical) = path.canonicalize() else {
            self.file_id = None;
            return false;
        };
        for (file_id, vfs_path) in self.vfs.iter() {
            if let Some(abs_path) = vfs_path.as_path() {
                let as_path: &Path = abs_path.as_ref();
                if as_path == canonical.as_path() {
                    self.file_id = Some(file_id);
                    return true;
                }
            }
        }
        self.file_id = None;
        false
    }

    fn hover_at(&self, offset: TextSize) -> Option<HoverResult> {
        let file_id = self.file_id?;
        let analysis = self.host.analysis();

        let config = HoverConfig {
            links_in_hover: false,
            memory_layout: None,
            documentation: false,
            format: HoverDocFormat::Markdown,
            keywords: false,
            max_trait_assoc_items_count: None,
            max_fields_count: None,
            max_enum_variants_count: None,
            max_subst_ty_len: SubstTyLen::Unlimited,
        };

        let range = FileRange {
            file_id,
            range: TextRange::new(offset, offset),
        };

        analysis.hover(&config, range).ok().flatten().map(|ri| ri.info)
    }
}

impl GrowableOracle for SemanticOracle {
    fn is_growable_at(&self, offset: TextSize) -> Option<bool> {
        let hover = self.hover_at(offset)?;
        let ty = type_from_hover(&hover)?;
        Some(is_growable_type(&ty))
    }

    fn is_type_growable(&self, type_name: &str) -> Option<bool> {
        Some(is_growable_type(type_name))
    }
}

/// Extract the type string from a hover result.
///
/// Hover markup carries the type in a fenced code block; the first line
/// after the fence is the type (or a `let` line containing it).
fn type_from_hover(hover: &HoverResult) -> Option<String> {
    let text = hover.markup.as_str();

    if let Some(start) = text.find("```") {
        if let Some(end) = text[start + 3..].find("```") {
            let code_block = &text[start + 3..start + 3 + end];
            let type_line = code_block.lines().nth(1).unwrap_or(code_block);
            return Some(normalize_hover_line(type_line));
        }
    }

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("let ") || trimmed.contains(": ") {
            return Some(normalize_hover_line(trimmed));
        }
    }

    None
}

/// Reduce a hover line like `let a: Vec<i32>` to the type part.
fn normalize_hover_line(line: &str) -> String {
    let line = line.trim();
    match line.rsplit_once(": ") {
        Some((_, ty)) => ty.trim().to_string(),
        None => line.to_string(),
    }
}

/// Walk up from the file looking for the enclosing Cargo.toml.
fn find_manifest(file_path: &Path) -> Option<PathBuf> {
    let start = if file_path.is_dir() {
        file_path
    } else {
        file_path.parent()?
    };
    for dir in start.ancestors() {
        let candidate = dir.join("Cargo.toml");
        if candidate.exists() {
            return Some(candidate);
        }
    }
    None
}
