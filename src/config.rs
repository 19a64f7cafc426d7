use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::gesture::OPENNESS_SPAN;
use crate::movement::DEFAULT_MOVEMENT_THRESHOLD;

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub defaults: Defaults,
    pub ui: UiConfig,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub mirror_mode: bool,
    pub scroll_enabled: bool,
    /// Wheel lines per scroll action.
    pub scroll_lines: i32,
    /// Wrist displacement (normalized coords) below which movement is ignored.
    pub movement_threshold: f32,
    /// Thumb-pinky L1 distance mapping to a fully open hand.
    pub openness_span: f32,
    pub detection_confidence: f32,
    pub tracking_confidence: f32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub landmark_dot_size: usize,
    pub landmark_color_hex: String, // e.g. "#FF0000"
    pub draw_connections: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            mirror_mode: true,
            scroll_enabled: true,
            scroll_lines: 3,
            movement_threshold: DEFAULT_MOVEMENT_THRESHOLD,
            openness_span: OPENNESS_SPAN,
            detection_confidence: 0.5,
            tracking_confidence: 0.5,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            landmark_dot_size: 2,
            landmark_color_hex: "#00FF00".to_string(),
            draw_connections: true,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            defaults: Defaults::default(),
            ui: UiConfig::default(),
        }
    }
}

impl AppConfig {
    const PATH: &'static str = "config.json";

    pub fn load() -> Result<Self> {
        let config = if Path::new(Self::PATH).exists() {
            let content = fs::read_to_string(Self::PATH)?;
            // Missing fields fall back to Default thanks to #[serde(default)]
            match serde_json::from_str::<AppConfig>(&content) {
                Ok(c) => {
                    println!("Loaded configuration from {}", Self::PATH);
                    c
                }
                Err(e) => {
                    println!("Error parsing config: {}. Loading defaults.", e);
                    Self::default()
                }
            }
        } else {
            println!(
                "Configuration file not found. Creating default at {}",
                Self::PATH
            );
            Self::default()
        };

        // Always save back so new fields show up in the file
        config.save()?;

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(Self::PATH, content)?;
        Ok(())
    }
}

/// "#RRGGBB" -> (r, g, b); falls back to green on malformed input.
pub fn parse_hex(hex: &str) -> (u8, u8, u8) {
    let hex = hex.trim_start_matches('#');
    // Length check alone isn't enough: slicing a 6-byte string with a
    // multi-byte character would panic at a char boundary.
    if hex.len() != 6 || !hex.is_ascii() {
        return (0, 255, 0);
    }
    let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
    let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
    let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
    (r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_trip_through_json() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.defaults.scroll_lines, 3);
        assert!(back.defaults.mirror_mode);
        assert!((back.defaults.movement_threshold - 0.005).abs() < 1e-9);
    }

    #[test]
    fn partial_config_fills_missing_fields() {
        let partial = r#"{ "defaults": { "scroll_lines": 5 } }"#;
        let config: AppConfig = serde_json::from_str(partial).unwrap();
        assert_eq!(config.defaults.scroll_lines, 5);
        // Untouched fields come from Default
        assert!((config.defaults.openness_span - 0.6).abs() < 1e-9);
        assert_eq!(config.ui.landmark_dot_size, 2);
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(parse_hex("#FF0000"), (255, 0, 0));
        assert_eq!(parse_hex("00FF00"), (0, 255, 0));
        assert_eq!(parse_hex("garbage"), (0, 255, 0));
        // 6 bytes but not 6 ASCII chars; must fall back, not panic
        assert_eq!(parse_hex("aéXYZ"), (0, 255, 0));
        assert_eq!(parse_hex("#ééé"), (0, 255, 0));
    }
}
