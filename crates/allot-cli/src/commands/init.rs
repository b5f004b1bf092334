use std::path::PathBuf;

use anyhow::Context;
use serde::Serialize;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::context::{AppContext, strip_allot_dir};
use crate::output::output;

const DEFAULT_CONFIG: &str = r#"[engine]
# Per-role capacity for staff without a quota record.
default_quota = 5
institution_prefix = "UP"
# Agreement value a self-report row must carry.
affirmative = "Yes"
batch_size = 500

[store]
# Empty means .allot/allot.db under the project root.
path = ""
"#;

#[derive(Debug, Serialize)]
struct InitResponse {
    project_root: String,
    store: String,
    config_created: bool,
}

/// Handle `allot init`.
pub async fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    let root = match flags.project.as_deref() {
        Some(path) => strip_allot_dir(PathBuf::from(path))?,
        None => std::env::current_dir().context("failed to read current directory")?,
    };
    if !root.is_dir() {
        anyhow::bail!("cannot initialize '{}': directory does not exist", root.display());
    }

    let allot_dir = root.join(".allot");
    std::fs::create_dir_all(&allot_dir)
        .with_context(|| format!("failed to create {}", allot_dir.display()))?;

    let config_path = allot_dir.join("config.toml");
    let config_created = !config_path.exists();
    if config_created {
        std::fs::write(&config_path, DEFAULT_CONFIG)
            .with_context(|| format!("failed to write {}", config_path.display()))?;
    }

    let config = bootstrap::load_config(&root)?;
    let store = config.store.resolve(&root);
    AppContext::init(&root, config).await?;
    tracing::info!(root = %root.display(), config_created, "initialized project");

    output(
        &InitResponse {
            project_root: root.display().to_string(),
            store: store.display().to_string(),
            config_created,
        },
        flags.format,
    )
}
