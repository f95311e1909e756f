use serde::{Deserialize, Serialize};
use std::fs;

use crate::core::paths;

/// Root configuration structure for deckhand.json
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DeckhandConfig {
    #[serde(default)]
    pub defaults: Defaults,
}

/// All configurable defaults that can be overridden via deckhand.json
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Defaults {
    #[serde(default = "default_cast")]
    pub cast: CastDefaults,

    #[serde(default = "default_play")]
    pub play: PlayDefaults,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            cast: default_cast(),
            play: default_play(),
        }
    }
}

/// Defaults applied when composing a new cast.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastDefaults {
    #[serde(default = "default_cast_width")]
    pub width: u16,

    #[serde(default = "default_cast_height")]
    pub height: u16,

    /// Simulated human typing speed for keystroke steps.
    #[serde(default = "default_keystroke_delay_ms")]
    pub keystroke_delay_ms: u64,
}

/// Defaults for cast playback.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayDefaults {
    #[serde(default = "default_player")]
    pub player: String,
}

// =============================================================================
// Default value functions (match current hardcoded behavior)
// =============================================================================

fn default_cast() -> CastDefaults {
    CastDefaults {
        width: default_cast_width(),
        height: default_cast_height(),
        keystroke_delay_ms: default_keystroke_delay_ms(),
    }
}

fn default_cast_width() -> u16 {
    80
}

fn default_cast_height() -> u16 {
    24
}

fn default_keystroke_delay_ms() -> u64 {
    100
}

fn default_play() -> PlayDefaults {
    PlayDefaults {
        player: default_player(),
    }
}

fn default_player() -> String {
    "asciinema".to_string()
}

// =============================================================================
// Loading functions
// =============================================================================

/// Load defaults, merging file config with built-in defaults.
/// If deckhand.json is missing or invalid, silently returns built-in defaults.
pub fn load_defaults() -> Defaults {
    load_config().defaults
}

/// Load the full deckhand.json config, falling back to defaults on any error.
pub fn load_config() -> DeckhandConfig {
    load_config_from_file().unwrap_or_default()
}

fn load_config_from_file() -> crate::Result<DeckhandConfig> {
    let path = paths::deckhand_json();

    if !path.exists() {
        return Err(crate::Error::other("deckhand.json not found"));
    }

    let content = fs::read_to_string(&path).map_err(|e| {
        crate::Error::internal_io(e.to_string(), Some(format!("read {}", path.display())))
    })?;

    let config: DeckhandConfig = serde_json::from_str(&content).map_err(|e| {
        crate::Error::validation_invalid_json(e, Some("parse deckhand.json".to_string()))
    })?;

    Ok(config)
}

/// Get the path to deckhand.json (for display purposes)
pub fn config_path() -> String {
    paths::deckhand_json().display().to_string()
}

/// Get built-in defaults (ignoring any file config)
pub fn builtin_defaults() -> Defaults {
    Defaults::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_defaults_match_asciicast_conventions() {
        let d = builtin_defaults();
        assert_eq!(d.cast.width, 80);
        assert_eq!(d.cast.height, 24);
        assert_eq!(d.play.player, "asciinema");
    }

    #[test]
    fn partial_config_fills_missing_fields() {
        let config: DeckhandConfig =
            serde_json::from_str(r#"{"defaults":{"cast":{"width":120}}}"#).unwrap();
        assert_eq!(config.defaults.cast.width, 120);
        assert_eq!(config.defaults.cast.height, 24);
        assert_eq!(config.defaults.cast.keystroke_delay_ms, 100);
    }
}
