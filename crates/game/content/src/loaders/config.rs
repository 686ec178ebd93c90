//! Exploration configuration loader.

use std::path::Path;

use anyhow::Context;
use explore_core::ExploreConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for exploration rules from TOML or RON files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate config data.
    ///
    /// Files ending in `.ron` are read as RON, everything else as TOML.
    /// Omitted fields keep their defaults.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the file containing an ExploreConfig
    pub fn load(path: &Path) -> LoadResult<ExploreConfig> {
        let content = read_file(path)?;
        let is_ron = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("ron"));

        let config = if is_ron {
            Self::parse_ron(&content)?
        } else {
            Self::parse_toml(&content)?
        };
        config
            .validate()
            .with_context(|| format!("Invalid config in {}", path.display()))?;

        Ok(config)
    }

    pub fn parse_toml(content: &str) -> LoadResult<ExploreConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))
    }

    pub fn parse_ron(content: &str) -> LoadResult<ExploreConfig> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config RON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use explore_core::ConfigError;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "explore.toml",
            "seed = 77\n\n[costs]\nswamp = 8\n",
        );

        let config = ConfigLoader::load(&path).unwrap();
        assert_eq!(config.seed, 77);
        assert_eq!(config.costs.swamp, 8);
        assert_eq!(config.notice_die, ExploreConfig::DEFAULT_NOTICE_DIE);
        assert_eq!(config.costs.plains, ExploreConfig::default().costs.plains);
    }

    #[test]
    fn ron_is_chosen_by_extension() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "explore.ron", "(seed: 5, notice_die: 12)");

        let config = ConfigLoader::load(&path).unwrap();
        assert_eq!(config.seed, 5);
        assert_eq!(config.notice_die, 12);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "explore.toml", "notice_die = 1\n");

        let error = ConfigLoader::load(&path).unwrap_err();
        assert_eq!(
            error.downcast_ref::<ConfigError>(),
            Some(&ConfigError::NoticeDieTooSmall(1))
        );
    }

    #[test]
    fn missing_file_names_the_path() {
        let error = ConfigLoader::load(Path::new("/nonexistent/explore.toml")).unwrap_err();
        assert!(error.to_string().contains("/nonexistent/explore.toml"));
    }
}
