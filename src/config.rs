use std::fs;
use std::path::Path;

use egui::Color32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layer::BrushParams;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings of the brush tool itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    pub size: f32,
    /// Scale line width with pen pressure when the device reports it
    pub pressure: bool,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            size: 5.0,
            pressure: false,
        }
    }
}

/// Shared tool configuration, read by tools at the start of each interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct EditorConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub color: Color32,
    /// 0 - 255
    pub alpha: u8,
    pub brush: BrushConfig,
    pub history_limit: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 600,
            color: Color32::BLACK,
            alpha: 255,
            brush: BrushConfig::default(),
            history_limit: 100,
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Current brush parameters as they would be snapshotted into a layer.
    pub fn brush_params(&self) -> BrushParams {
        BrushParams {
            size: self.brush.size,
            pressure: self.brush.pressure,
            color: self.color,
        }
    }

    /// Global alpha scaled to a 0 - 100 layer opacity.
    pub fn opacity(&self) -> u8 {
        (f32::from(self.alpha) / 255.0 * 100.0).round() as u8
    }
}
