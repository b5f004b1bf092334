//! Document store location.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Path to the libSQL database file. Empty means `<project>/.allot/allot.db`.
    #[serde(default)]
    pub path: String,
}

impl StoreConfig {
    /// Resolve the database path against a project root.
    #[must_use]
    pub fn resolve(&self, project_root: &Path) -> PathBuf {
        if self.path.is_empty() {
            project_root.join(".allot").join("allot.db")
        } else {
            let path = PathBuf::from(&self.path);
            if path.is_absolute() {
                path
            } else {
                project_root.join(path)
            }
        }
    }
}
