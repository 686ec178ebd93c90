//! CLI configuration read from the environment.
use std::env;
use std::path::PathBuf;

/// Terminal driver configuration.
///
/// Rules and stop-condition texts live in content files; this only says
/// where to find them.
#[derive(Clone, Debug)]
pub struct CliConfig {
    /// Exploration rules (TOML or RON). Built-in defaults when unset.
    pub rules_path: Option<PathBuf>,
    /// Stop-condition text overrides (RON).
    pub stop_templates_path: Option<PathBuf>,
    /// Log directory override.
    pub log_dir: Option<PathBuf>,
    /// Number of players keeping a copy of the demo map.
    pub players: u32,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            rules_path: None,
            stop_templates_path: None,
            log_dir: None,
            players: 2,
        }
    }
}

impl CliConfig {
    /// Construct CLI configuration from environment variables.
    ///
    /// Environment variables:
    /// - `EXPLORE_CONFIG` - Path to the rules file
    /// - `EXPLORE_STOP_TEMPLATES` - Path to the stop-condition texts
    /// - `EXPLORE_LOG_DIR` - Directory for log files
    /// - `EXPLORE_PLAYERS` - Player count (default: 2, minimum: 1)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.rules_path = read_env("EXPLORE_CONFIG");
        config.stop_templates_path = read_env("EXPLORE_STOP_TEMPLATES");
        config.log_dir = read_env("EXPLORE_LOG_DIR");
        if let Some(players) = read_env::<u32>("EXPLORE_PLAYERS") {
            config.players = players.max(1);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    let value = env::var(key).ok()?;
    if value.trim().is_empty() {
        return None;
    }
    value.trim().parse().ok()
}
