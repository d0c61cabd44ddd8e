//! Run configuration
//!
//! Read once at startup and never changed during a run.

use crate::error::{SpeedError, SpeedResult};
use crate::estimate::ElapsedTimePolicy;
use std::path::PathBuf;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How images are obtained each iteration
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CaptureMode {
    /// Use existing `<prefix><i>.jpg` files
    #[default]
    DryRun,
    /// Run an external program (see [`crate::CommandCapture`])
    Command { program: String, args: Vec<String> },
}

/// Settings for one sampling run
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunConfig {
    /// Iteration `i` uses `<image_path_prefix><i>.jpg`
    pub image_path_prefix: String,
    pub max_duration_minutes: f64,
    pub max_iterations: u32,
    pub delay_seconds: f64,
    pub result_path: PathBuf,
    pub capture: CaptureMode,
    pub elapsed_policy: ElapsedTimePolicy,
}

impl Default for RunConfig {
    fn default() -> Self {
        // Test settings; a deployment runs for 9 minutes and up to 42 iterations
        Self {
            image_path_prefix: "photos/".to_string(),
            max_duration_minutes: 1.0,
            max_iterations: 3,
            delay_seconds: 5.0,
            result_path: PathBuf::from("result.txt"),
            capture: CaptureMode::DryRun,
            elapsed_policy: ElapsedTimePolicy::Absolute,
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> SpeedResult<()> {
        if self.max_iterations == 0 {
            return Err(SpeedError::InvalidConfig(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        if !self.max_duration_minutes.is_finite() || self.max_duration_minutes < 0.0 {
            return Err(SpeedError::InvalidConfig(format!(
                "max_duration_minutes must be a non-negative number, got {}",
                self.max_duration_minutes
            )));
        }
        if !self.delay_seconds.is_finite() || self.delay_seconds < 0.0 {
            return Err(SpeedError::InvalidConfig(format!(
                "delay_seconds must be a non-negative number, got {}",
                self.delay_seconds
            )));
        }
        if let CaptureMode::Command { program, .. } = &self.capture {
            if program.trim().is_empty() {
                return Err(SpeedError::InvalidConfig(
                    "capture command must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Saturates for values too large to represent; call [`validate`](Self::validate) first
    pub fn max_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.max_duration_minutes * 60.0).unwrap_or(Duration::MAX)
    }

    pub fn delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.delay_seconds).unwrap_or(Duration::MAX)
    }

    /// Path of the image taken in iteration `i` (zero-based)
    pub fn image_path(&self, iteration: u32) -> PathBuf {
        PathBuf::from(format!("{}{}.jpg", self.image_path_prefix, iteration))
    }

    /// Load a configuration from JSON; absent keys keep their defaults
    #[cfg(feature = "json")]
    pub fn from_json_file(path: &std::path::Path) -> crate::Result<Self> {
        use anyhow::Context;

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: RunConfig = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }
}
