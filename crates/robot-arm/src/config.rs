use anyhow::{Context, Result};
use robot_arm_core::{
    ArmGeometry, control::DEFAULT_NUDGE_DEGREES, geometry::DEFAULT_X_EPSILON,
    timeline::DEFAULT_STEP_DURATION,
};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, time::Duration};

/// Main configuration for the arm driver
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Arm dimensions
    #[serde(default)]
    pub arm: ArmGeometry,

    /// Pick-and-place playback
    #[serde(default)]
    pub animation: AnimationConfig,

    /// Manual joint adjustment
    #[serde(default)]
    pub manual: ManualConfig,
}

/// Animation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Width of one joint motion in milliseconds
    #[serde(default = "default_step_millis")]
    pub step_millis: u64,

    /// Interval between rendered frames in milliseconds
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,

    /// Substitute for a target x of exactly zero
    #[serde(default = "default_x_epsilon")]
    pub x_epsilon: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            step_millis: default_step_millis(),
            tick_millis: default_tick_millis(),
            x_epsilon: default_x_epsilon(),
        }
    }
}

impl AnimationConfig {
    pub fn step(&self) -> Duration {
        Duration::from_millis(self.step_millis)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }
}

/// Manual control configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualConfig {
    /// Degrees applied per nudge
    #[serde(default = "default_step_degrees")]
    pub step_degrees: f64,
}

impl Default for ManualConfig {
    fn default() -> Self {
        Self {
            step_degrees: default_step_degrees(),
        }
    }
}

fn default_step_millis() -> u64 {
    DEFAULT_STEP_DURATION.as_millis() as u64
}

fn default_tick_millis() -> u64 {
    16
}

fn default_x_epsilon() -> f64 {
    DEFAULT_X_EPSILON
}

fn default_step_degrees() -> f64 {
    DEFAULT_NUDGE_DEGREES
}

impl Config {
    /// Load configuration from a file, auto-detecting TOML or JSON format
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => Self::from_toml(&content),
            Some("json") => Self::from_json(&content),
            // TOML is preferred, JSON is the fallback
            _ => Self::from_toml(&content).or_else(|_| Self::from_json(&content)),
        }
    }

    /// Load from `path` when given, otherwise use the defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("failed to parse config as TOML")
    }

    /// Parse configuration from JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("failed to parse config as JSON")
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.arm.link_length.is_finite() && self.arm.link_length > 0.0) {
            anyhow::bail!("arm.link_length must be positive");
        }
        if !self.arm.base_height.is_finite() || self.arm.base_height < 0.0 {
            anyhow::bail!("arm.base_height cannot be negative");
        }
        if self.animation.step_millis == 0 {
            anyhow::bail!("animation.step_millis must be at least 1");
        }
        if self.animation.tick_millis == 0 {
            anyhow::bail!("animation.tick_millis must be at least 1");
        }
        if !(self.animation.x_epsilon.is_finite() && self.animation.x_epsilon > 0.0) {
            anyhow::bail!("animation.x_epsilon must be positive");
        }
        if !(self.manual.step_degrees.is_finite() && self.manual.step_degrees > 0.0) {
            anyhow::bail!("manual.step_degrees must be positive");
        }
        Ok(())
    }
}
