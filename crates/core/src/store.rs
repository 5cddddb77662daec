use std::path::Path;

use tokio::fs;

use crate::{episode::EpisodeConfig, error::Result};

/// Save an episode plan to a file, creating parent directories.
pub async fn save_plan(episode: &EpisodeConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let pretty_json = serde_json::to_string_pretty(episode)?;
    fs::write(path, &pretty_json).await?;
    tracing::debug!("Saved plan to {}", path.display());
    Ok(())
}

/// Load an episode plan from a saved file.
///
/// Files edited by hand are rejected unless they still describe a plan
/// the allocator could have produced.
pub async fn load_plan(path: &Path) -> Result<EpisodeConfig> {
    let json_content = fs::read_to_string(path).await?;
    let episode: EpisodeConfig = serde_json::from_str(&json_content)?;
    episode.validate()?;
    Ok(episode)
}
