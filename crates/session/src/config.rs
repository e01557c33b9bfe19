//! Runtime configuration from environment variables.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::SNAKE_BOARD_SIZE;

/// Smallest snake board that still leaves room to move
pub const MIN_SNAKE_SIZE: u8 = 4;

/// Largest snake board the terminal view can lay out
pub const MAX_SNAKE_SIZE: u8 = 40;

/// Default store file name under `$HOME`
pub const DEFAULT_STORE_FILE: &str = ".tui-arcade.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcadeConfig {
    /// JSON store for high scores and sound preferences; `None` keeps them in memory
    pub store_path: Option<PathBuf>,
    pub seed: u32,
    pub snake_size: u8,
    pub sound_disabled: bool,
    /// Also write every frame as JSON lines here
    pub observe_path: Option<PathBuf>,
    /// Log file; logging is off without one so the terminal stays clean
    pub log_path: Option<PathBuf>,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            store_path: None,
            seed: 1,
            snake_size: SNAKE_BOARD_SIZE,
            sound_disabled: false,
            observe_path: None,
            log_path: None,
        }
    }
}

impl ArcadeConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from any variable source. Unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let store_path = non_empty("ARCADE_STORE_PATH").map(PathBuf::from).or_else(|| {
            non_empty("HOME").map(|home| PathBuf::from(home).join(DEFAULT_STORE_FILE))
        });

        let seed = non_empty("ARCADE_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(clock_seed);

        let snake_size = non_empty("ARCADE_SNAKE_SIZE")
            .and_then(|s| s.parse::<u8>().ok())
            .unwrap_or(SNAKE_BOARD_SIZE)
            .clamp(MIN_SNAKE_SIZE, MAX_SNAKE_SIZE);

        let sound_disabled = non_empty("ARCADE_SOUND_DISABLED")
            .map(|s| !matches!(s.to_lowercase().as_str(), "0" | "false" | "no" | "off"))
            .unwrap_or(false);

        Self {
            store_path,
            seed,
            snake_size,
            sound_disabled,
            observe_path: non_empty("ARCADE_OBSERVE_PATH").map(PathBuf::from),
            log_path: non_empty("ARCADE_LOG_PATH").map(PathBuf::from),
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as u32 ^ d.subsec_nanos())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> ArcadeConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ArcadeConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_from_env_does_not_panic() {
        let _config = ArcadeConfig::from_env();
    }

    #[test]
    fn test_explicit_values() {
        let config = config_from(&[
            ("ARCADE_STORE_PATH", "/tmp/scores.json"),
            ("ARCADE_SEED", "42"),
            ("ARCADE_SNAKE_SIZE", "12"),
            ("ARCADE_SOUND_DISABLED", "1"),
            ("ARCADE_OBSERVE_PATH", "/tmp/frames.jsonl"),
            ("ARCADE_LOG_PATH", " /tmp/arcade.log "),
        ]);
        assert_eq!(config.store_path, Some(PathBuf::from("/tmp/scores.json")));
        assert_eq!(config.seed, 42);
        assert_eq!(config.snake_size, 12);
        assert!(config.sound_disabled);
        assert_eq!(config.observe_path, Some(PathBuf::from("/tmp/frames.jsonl")));
        assert_eq!(config.log_path, Some(PathBuf::from("/tmp/arcade.log")));
    }

    #[test]
    fn test_defaults_and_fallbacks() {
        let config = config_from(&[
            ("HOME", "/home/player"),
            ("ARCADE_SNAKE_SIZE", "huge"),
            ("ARCADE_SOUND_DISABLED", "false"),
            ("ARCADE_LOG_PATH", "   "),
        ]);
        assert_eq!(
            config.store_path,
            Some(PathBuf::from("/home/player/.tui-arcade.json"))
        );
        assert_eq!(config.snake_size, SNAKE_BOARD_SIZE);
        assert!(!config.sound_disabled);
        assert_eq!(config.log_path, None);
    }

    #[test]
    fn test_snake_size_clamped() {
        assert_eq!(config_from(&[("ARCADE_SNAKE_SIZE", "2")]).snake_size, MIN_SNAKE_SIZE);
        assert_eq!(config_from(&[("ARCADE_SNAKE_SIZE", "200")]).snake_size, MAX_SNAKE_SIZE);
    }

    #[test]
    fn test_no_home_means_memory_store() {
        assert_eq!(config_from(&[]).store_path, None);
    }
}
