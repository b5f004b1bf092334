use std::path::Path;

use allot_config::AllotConfig;
use allot_db::AllotDb;
use anyhow::Context;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub db: AllotDb,
    pub config: AllotConfig,
}

impl AppContext {
    /// Open the document store configured for the discovered project root.
    pub async fn init(project_root: &Path, config: AllotConfig) -> anyhow::Result<Self> {
        let db_path = config.store.resolve(project_root);
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let db = AllotDb::open_local(&db_path.to_string_lossy())
            .await
            .with_context(|| format!("failed to open allot store at {}", db_path.display()))?;
        tracing::debug!(path = %db_path.display(), "store ready");

        Ok(Self { db, config })
    }
}
