//! Renderer configuration.

use super::Holiday;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings that affect how turtles are assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Force a holiday instead of reading the system clock.
    pub holiday: Option<Holiday>,
    /// Labels that render the turtle upside down.
    pub flip_labels: Vec<String>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            holiday: None,
            flip_labels: vec!["Dinnerbone".to_string(), "Grumm".to_string()],
        }
    }
}

impl RendererConfig {
    /// Parse a JSON config. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn with_holiday(mut self, holiday: Holiday) -> Self {
        self.holiday = Some(holiday);
        self
    }

    pub fn with_flip_labels(mut self, labels: Vec<String>) -> Self {
        self.flip_labels = labels;
        self
    }

    /// The configured holiday, or today's.
    pub fn holiday(&self) -> Holiday {
        self.holiday.unwrap_or_else(Holiday::current)
    }

    pub fn is_christmas(&self) -> bool {
        self.holiday() == Holiday::Christmas
    }

    /// Whether a turtle with this label is drawn upside down.
    pub fn is_flipped(&self, label: Option<&str>) -> bool {
        label.is_some_and(|label| self.flip_labels.iter().any(|l| l == label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RendererConfig::default();
        assert!(config.is_flipped(Some("Dinnerbone")));
        assert!(config.is_flipped(Some("Grumm")));
        assert!(!config.is_flipped(Some("dinnerbone")));
        assert!(!config.is_flipped(None));
    }

    #[test]
    fn test_holiday_override() {
        let config = RendererConfig::default().with_holiday(Holiday::Christmas);
        assert!(config.is_christmas());
        assert!(!RendererConfig::default().with_holiday(Holiday::Halloween).is_christmas());
    }

    #[test]
    fn test_from_json_keeps_defaults() {
        let config = RendererConfig::from_json(r#"{ "holiday": "christmas" }"#).unwrap();
        assert_eq!(config.holiday, Some(Holiday::Christmas));
        assert_eq!(config.flip_labels.len(), 2);

        let config = RendererConfig::from_json(r#"{ "flip_labels": ["Upside"] }"#).unwrap();
        assert!(config.is_flipped(Some("Upside")));
        assert!(!config.is_flipped(Some("Dinnerbone")));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("renderer.json");
        std::fs::write(&path, r#"{ "holiday": "none" }"#).unwrap();

        let config = RendererConfig::load(&path).unwrap();
        assert_eq!(config.holiday(), Holiday::None);
        assert!(RendererConfig::load(dir.path().join("missing.json")).is_err());
    }
}
