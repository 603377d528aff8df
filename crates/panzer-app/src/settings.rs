//! Application settings, read from a JSON dotfile.
//!
//! Every field has a default so a partial or missing file still yields
//! a usable configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use panzer_core::constants::TICK_RATE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Milliseconds per tick.
    pub tick_millis: u64,
    /// Directory of extra `.map` files shown in the menu.
    pub maps_dir: Option<PathBuf>,
    /// Fixed session seed; when unset each session gets a random one.
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_millis: 1000 / u64::from(TICK_RATE),
            maps_dir: None,
            seed: None,
        }
    }
}

fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".panzer_settings.json")
}

/// Load settings, falling back to defaults on any failure.
pub fn load() -> Settings {
    let path = settings_path();
    match std::fs::read_to_string(&path) {
        Ok(text) => match serde_json::from_str(&text) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("ignoring invalid settings {}: {err}", path.display());
                Settings::default()
            }
        },
        Err(_) => Settings::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.tick_millis, 100);
        assert!(settings.maps_dir.is_none());
        assert!(settings.seed.is_none());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"seed": 7}"#).unwrap();
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.tick_millis, Settings::default().tick_millis);
    }

    #[test]
    fn test_round_trip() {
        let settings = Settings {
            tick_millis: 50,
            maps_dir: Some(PathBuf::from("/tmp/maps")),
            seed: Some(99),
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(serde_json::from_str::<Settings>(&json).unwrap(), settings);
    }
}
