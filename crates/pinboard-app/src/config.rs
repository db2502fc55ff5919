//! Application configuration.

use std::path::PathBuf;

use pinboard_core::WhiteboardConfig;
use pinboard_core::session::{DEFAULT_BOARD_ID, Session};
use serde::{Deserialize, Serialize};

/// Application configuration, read from `<config dir>/pinboard/config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
    pub user_id: String,
    pub board_id: String,
    /// Overrides the platform data directory for boards and assets.
    pub data_dir: Option<PathBuf>,
    pub whiteboard: WhiteboardConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Pinboard".to_string(),
            width: 1280.0,
            height: 800.0,
            user_id: "local".to_string(),
            board_id: DEFAULT_BOARD_ID.to_string(),
            data_dir: None,
            whiteboard: WhiteboardConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pinboard").join("config.json"))
    }

    /// Load the config file, falling back to defaults when it is missing or invalid.
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            log::warn!("No config directory on this platform, using defaults");
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => Self::from_json(&json).unwrap_or_else(|e| {
                log::error!("Invalid config {}: {}", path.display(), e);
                Self::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::error!("Failed to read config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse a config; the engine section is sanitized before use.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut config: Self = serde_json::from_str(json)?;
        config.whiteboard = config.whiteboard.sanitized();
        Ok(config)
    }

    pub fn session(&self) -> Session {
        Session::new(self.user_id.clone(), self.board_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config() {
        let config = AppConfig::from_json(
            r#"{"userId": "alice", "whiteboard": {"maxZoom": 2.0}}"#,
        )
        .unwrap();
        assert_eq!(config.session(), Session::new("alice", DEFAULT_BOARD_ID));
        assert!((config.whiteboard.max_zoom - 2.0).abs() < f64::EPSILON);
        assert_eq!(config.title, "Pinboard");
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_inverted_zoom_limits_fixed_on_load() {
        let config = AppConfig::from_json(r#"{"whiteboard": {"minZoom": 6}}"#).unwrap();
        assert!(config.whiteboard.min_zoom <= config.whiteboard.max_zoom);
        assert!((config.whiteboard.max_zoom - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_data_dir_override() {
        let config = AppConfig::from_json(r#"{"dataDir": "/tmp/boards"}"#).unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/boards")));
    }
}
