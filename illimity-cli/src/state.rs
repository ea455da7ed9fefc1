use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// `$ILLIMITY_HOME`, or `~/.illimity`.
pub fn illimity_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("ILLIMITY_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".illimity"))
}

pub fn ensure_illimity_home() -> Result<PathBuf> {
    let dir = illimity_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Relative paths in the config are taken relative to the home directory.
pub fn resolve_in_home(home: &Path, p: &Path) -> PathBuf {
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        home.join(p)
    }
}

pub fn exports_dir() -> Result<PathBuf> {
    let dir = ensure_illimity_home()?.join("exports");
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
