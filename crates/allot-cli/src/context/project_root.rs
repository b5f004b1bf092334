use std::path::{Path, PathBuf};

use anyhow::Context;

/// Walk upwards from `start` until a `.allot` directory is found.
#[must_use]
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(".allot").is_dir() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Accept either a project root or its `.allot` directory and return the root.
pub fn strip_allot_dir(path: PathBuf) -> anyhow::Result<PathBuf> {
    if path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name == ".allot")
    {
        return path
            .parent()
            .map(Path::to_path_buf)
            .context("invalid --project path: '.allot' directory has no parent");
    }
    Ok(path)
}
