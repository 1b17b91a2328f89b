use serde::{Deserialize, Serialize};

use crate::api::error::Result;

/// Clock settings for the move scheduler.
/// Loaded from JSON or built in code; missing fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimatorConfig {
    /// Fixed tick interval in seconds (default: 1/60).
    #[serde(default = "default_fixed_dt")]
    pub fixed_dt: f32,
    /// Maximum fixed ticks run for a single frame (default: 10).
    #[serde(default = "default_max_steps")]
    pub max_steps_per_frame: u32,
}

fn default_fixed_dt() -> f32 {
    1.0 / 60.0
}

fn default_max_steps() -> u32 {
    10
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            fixed_dt: default_fixed_dt(),
            max_steps_per_frame: default_max_steps(),
        }
    }
}

impl AnimatorConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_fixed_dt(mut self, fixed_dt: f32) -> Self {
        self.fixed_dt = fixed_dt;
        self
    }

    pub fn with_max_steps_per_frame(mut self, steps: u32) -> Self {
        self.max_steps_per_frame = steps;
        self
    }
}
