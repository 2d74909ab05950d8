//! Tool configuration

use pickalign_algorithms::DEFAULT_DEGENERACY_EPSILON;
use pickalign_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Which transform a session solves for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentMode {
    /// Three points per object, rotation only
    #[default]
    Rotation,
    /// One point per object, translation only
    Translation,
}

impl AlignmentMode {
    /// Points each object must receive before the session resolves
    pub fn required_points_per_object(self) -> usize {
        match self {
            AlignmentMode::Rotation => 3,
            AlignmentMode::Translation => 1,
        }
    }

    /// Points across both objects that trigger a solve
    pub fn required_total(self) -> usize {
        2 * self.required_points_per_object()
    }

    /// Name under which the tool for this mode registers
    pub fn tool_name(self) -> &'static str {
        match self {
            AlignmentMode::Rotation => "pickalign-rotation-tool",
            AlignmentMode::Translation => "pickalign-translation-tool",
        }
    }
}

/// Marker sprite parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    pub sprite_size: u32,
    pub color: [u8; 3],
    /// Added to the running pick count to form marker ids
    pub id_offset: u32,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            sprite_size: 32,
            color: [255, 255, 255],
            id_offset: 10000,
        }
    }
}

/// Logging parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_target: true,
        }
    }
}

/// Top-level alignment tool configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignConfig {
    pub mode: AlignmentMode,
    /// Absolute length in world units below which a triple counts as
    /// degenerate. It does not scale with the picked coordinates, so scenes
    /// far from the origin or in large units need a proportionally larger
    /// value; at coordinates around 1e7 float noise alone reaches ~1e-9.
    pub degeneracy_epsilon: f64,
    pub priority: i32,
    pub markers: MarkerConfig,
    pub logging: LoggingConfig,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            mode: AlignmentMode::default(),
            degeneracy_epsilon: DEFAULT_DEGENERACY_EPSILON,
            priority: 13,
            markers: MarkerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AlignConfig {
    /// Default configuration for `mode`
    pub fn for_mode(mode: AlignmentMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Reject values the session cannot work with
    pub fn validate(&self) -> Result<()> {
        if !self.degeneracy_epsilon.is_finite() || self.degeneracy_epsilon <= 0.0 {
            return Err(Error::Config(format!(
                "degeneracy_epsilon must be positive and finite, got {}",
                self.degeneracy_epsilon
            )));
        }
        if self.markers.sprite_size == 0 {
            return Err(Error::Config("markers.sprite_size must be positive".to_string()));
        }
        let picks = self.mode.required_total() as u32;
        if self.markers.id_offset.checked_add(picks).is_none() {
            return Err(Error::Config(format!(
                "markers.id_offset must leave room for {} marker ids, got {}",
                picks, self.markers.id_offset
            )));
        }
        Ok(())
    }
}
