use std::path::Path;

use allot_config::AllotConfig;
use anyhow::Context;

/// Load `.env` for the project, then the layered configuration rooted there.
pub fn load_config(project_root: &Path) -> anyhow::Result<AllotConfig> {
    load_project_dotenv(project_root)?;
    AllotConfig::load_for_project(project_root).map_err(anyhow::Error::from)
}

fn load_project_dotenv(project_root: &Path) -> anyhow::Result<()> {
    let env_path = project_root.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
        return Ok(());
    }

    dotenvy::dotenv().ok();
    Ok(())
}
