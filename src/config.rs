//! Editor configuration.
//!
//! Every field has a default so a partial JSON file still loads, e.g.
//! `{ "placement": { "step": 40 } }` only changes the placement step.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geometry::Point;
use crate::hitbox::FieldLimits;
use crate::store::PlacementDefaults;

/// File name looked up in the working directory at startup.
pub const CONFIG_FILE_NAME: &str = "hitbox-edit.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Bounds and default for an integer slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderRange {
    pub min: u32,
    pub max: u32,
    pub def: u32,
    pub step: u32,
}

impl SliderRange {
    /// Clamps into `min..=max` and snaps to the nearest step above `min`.
    pub fn clamp(&self, value: u32) -> u32 {
        let v = value.clamp(self.min, self.max);
        if self.step <= 1 {
            return v;
        }
        let snapped = self.min + ((v - self.min + self.step / 2) / self.step) * self.step;
        snapped.min(self.max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub placement: PlacementDefaults,
    pub limits: FieldLimits,
    /// Increment used by the panel's +/- buttons.
    pub field_step: i32,
    pub animation_ms: u64,
    pub panel_origin: Point,
    pub window_size: [f32; 2],
    pub scale: SliderRange,
    pub grid_size: SliderRange,
    /// Number of animation frames laid out across the sprite sheet.
    pub frames: SliderRange,
    pub log_level: LogLevel,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            placement: PlacementDefaults::default(),
            limits: FieldLimits::default(),
            field_step: 10,
            animation_ms: 300,
            panel_origin: Point::new(400, 200),
            window_size: [900.0, 700.0],
            scale: SliderRange {
                min: 1,
                max: 16,
                def: 10,
                step: 1,
            },
            grid_size: SliderRange {
                min: 8,
                max: 240,
                def: 80,
                step: 8,
            },
            frames: SliderRange {
                min: 1,
                max: 1000,
                def: 1,
                step: 1,
            },
            log_level: LogLevel::default(),
        }
    }
}

impl EditorConfig {
    pub fn animation_window(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }

    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&data)
    }

    /// Loads `path` if it exists, otherwise uses defaults. A file that
    /// exists but fails to load is reported and ignored.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }
}
