use std::path::{Path, PathBuf};

use crate::error::{DecodedError, Result};

/// Name of the optional settings file inside the base directory.
pub const CONFIG_FILE_NAME: &str = "decoded.toml";

/// Default deployment root: the platform data directory.
pub fn default_base_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("decoded")
}

/// On-disk layout of a deployment, rooted at a base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    base_dir: PathBuf,
}

impl Layout {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join(CONFIG_FILE_NAME)
    }

    pub fn scripts_dir(&self) -> PathBuf {
        self.base_dir.join("scripts")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }

    pub fn log_file(&self) -> PathBuf {
        self.logs_dir().join("podcast_generator.log")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.base_dir.join("output")
    }

    pub fn audio_dir(&self) -> PathBuf {
        self.output_dir().join("audio")
    }

    pub fn rss_dir(&self) -> PathBuf {
        self.output_dir().join("rss")
    }

    pub fn cover_art_dir(&self) -> PathBuf {
        self.output_dir().join("cover_art")
    }

    pub fn episodes_db(&self) -> PathBuf {
        self.output_dir().join("episodes.json")
    }

    /// Resolve a path from settings: relative paths hang off the base dir.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Get the path for a saved episode plan
    pub fn plan_path(&self, episode_slug: &str) -> PathBuf {
        self.scripts_dir().join(format!("{episode_slug}.plan.json"))
    }

    /// Every directory the pipeline writes into.
    pub fn directories(&self) -> Vec<PathBuf> {
        vec![
            self.scripts_dir(),
            self.logs_dir(),
            self.output_dir(),
            self.audio_dir(),
            self.rss_dir(),
            self.cover_art_dir(),
        ]
    }

    /// Create all directories. Safe to call repeatedly.
    pub fn ensure(&self) -> Result<()> {
        for dir in self.directories() {
            std::fs::create_dir_all(&dir).map_err(|source| DecodedError::CreateDirFailed {
                path: dir.clone(),
                source,
            })?;
            tracing::debug!("Ensured directory {}", dir.display());
        }
        Ok(())
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(default_base_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_paths() {
        let layout = Layout::new("/srv/decoded");
        assert_eq!(layout.audio_dir(), PathBuf::from("/srv/decoded/output/audio"));
        assert_eq!(
            layout.episodes_db(),
            PathBuf::from("/srv/decoded/output/episodes.json")
        );
        assert_eq!(
            layout.log_file(),
            PathBuf::from("/srv/decoded/logs/podcast_generator.log")
        );
        assert_eq!(
            layout.plan_path("2026-10-16"),
            PathBuf::from("/srv/decoded/scripts/2026-10-16.plan.json")
        );
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let layout = Layout::new("/srv/decoded");
        assert_eq!(
            layout.resolve(Path::new("kaggle/kaggle.json")),
            PathBuf::from("/srv/decoded/kaggle/kaggle.json")
        );
        assert_eq!(
            layout.resolve(Path::new("/etc/kaggle.json")),
            PathBuf::from("/etc/kaggle.json")
        );
    }

    #[test]
    fn test_default_base_dir_ends_with_app_name() {
        assert!(default_base_dir().ends_with("decoded"));
    }
}
