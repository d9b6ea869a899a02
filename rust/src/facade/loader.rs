use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A file with this name is addressed by its directory's name.
pub const MODULE_ROOT_FILE: &str = "mod.rs";
pub const SOURCE_EXTENSION: &str = "rs";

/// Raw contents of one source file tagged with its module identifier.
#[derive(Debug, Clone)]
pub struct ModuleSource {
    pub path: PathBuf,
    pub module_id: Option<String>,
    pub text: String,
}

/// Notified before each file is read.
pub trait LoadObserver {
    fn on_load(&self, path: &Path);
}

impl<F: Fn(&Path)> LoadObserver for F {
    fn on_load(&self, path: &Path) {
        self(path)
    }
}

pub struct NoopObserver;

impl LoadObserver for NoopObserver {
    fn on_load(&self, _path: &Path) {}
}

/// `shapes/mod.rs` is `shapes`, `shapes/circle.rs` is `circle`.
pub fn module_id(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_string_lossy();
    if file_name == MODULE_ROOT_FILE {
        let dir = path.parent()?.file_name()?;
        return Some(dir.to_string_lossy().into_owned());
    }
    let suffix = format!(".{}", SOURCE_EXTENSION);
    let stem = file_name.strip_suffix(&suffix).unwrap_or(file_name.as_ref());
    Some(stem.to_string())
}

pub fn load_module(path: &Path, observer: &dyn LoadObserver) -> Result<ModuleSource> {
    observer.on_load(path);
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(ModuleSource {
        path: path.to_path_buf(),
        module_id: module_id(path),
        text,
    })
}
