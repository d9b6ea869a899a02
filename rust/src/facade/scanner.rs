use crate::facade::extractor::extract_module;
use crate::facade::loader::{load_module, LoadObserver, SOURCE_EXTENSION};
use crate::facade::model::{ModuleSignatureSet, Variant};
use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;

pub const DEFAULT_IMPL_TARGET: &str = "NameMe";
pub const DEFAULT_ASYNC_PREFIX: &str = "Async";

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

#[derive(Clone, Debug)]
pub struct GenerateConfig {
    /// Crate root; sources are read from its `src` directory.
    pub root: PathBuf,
    pub trait_name: String,
    /// Type the forwarding impl is written for, renamed by hand afterwards.
    pub impl_target: String,
    pub async_prefix: String,
}

impl GenerateConfig {
    pub fn new(root: impl Into<PathBuf>, trait_name: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            trait_name: trait_name.into(),
            impl_target: DEFAULT_IMPL_TARGET.to_string(),
            async_prefix: DEFAULT_ASYNC_PREFIX.to_string(),
        }
    }

    pub fn interface_name(&self, variant: Variant) -> String {
        match variant {
            Variant::Async => format!("{}{}", self.async_prefix, self.trait_name),
            Variant::Sync => self.trait_name.clone(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        for name in [
            self.interface_name(Variant::Sync),
            self.interface_name(Variant::Async),
            self.impl_target.clone(),
        ] {
            if !IDENTIFIER.is_match(&name) {
                bail!("`{}` is not a valid Rust identifier", name);
            }
        }
        Ok(())
    }
}

/// Every `.rs` file below `<root>/src`, in directory walk order.
pub fn discover_sources(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root.join("src"))
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some(SOURCE_EXTENSION))
        .collect()
}

/// Loads and extracts every discovered file; the first unreadable file
/// aborts the whole scan.
pub fn scan_project(
    cfg: &GenerateConfig,
    observer: &dyn LoadObserver,
) -> Result<Vec<ModuleSignatureSet>> {
    let mut modules = Vec::new();
    for path in discover_sources(&cfg.root) {
        let source = load_module(&path, observer)?;
        modules.push(extract_module(&source));
    }
    let functions: usize = modules.iter().map(|m| m.signatures.len()).sum();
    info!(files = modules.len(), functions, "scan complete");
    Ok(modules)
}

pub fn write_json(modules: &[ModuleSignatureSet], out: &mut dyn Write) -> Result<()> {
    let mut buf = BufWriter::new(out);
    serde_json::to_writer_pretty(&mut buf, modules)?;
    buf.write_all(b"\n")?;
    buf.flush()?;
    Ok(())
}
