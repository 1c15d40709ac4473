//! Data-driven physics tuning
//!
//! Every hand-tuned constant the collision core relies on lives here so a
//! level or test can override it without touching code. Loaded from and
//! saved to JSON.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Impacts closer than this to a corner reverse both velocity components
    pub vertex_tolerance: f64,
    /// Fraction of the way to an impact a slow ball advances
    pub backoff_base: f64,
    /// Largest amount the back-off fraction is reduced by speed
    pub backoff_cap: f64,
    /// How strongly distance per tick reduces the back-off fraction
    pub backoff_speed_factor: f64,
    /// Partial moves shorter than this are skipped
    pub minimum_movement: f64,

    /// Bounce regions across the paddle's top edge
    pub paddle_regions: usize,
    /// Degrees between adjacent launch angles
    pub paddle_angle_spacing: f64,
    /// Sensor pairs the paddle probes with before moving
    pub paddle_sensor_pairs: usize,

    /// Rejection-sampling budget when looking for a free point
    pub max_free_point_attempts: u32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            vertex_tolerance: 3.0,
            backoff_base: 0.75,
            backoff_cap: 0.5,
            backoff_speed_factor: 0.2,
            minimum_movement: 1.0,

            paddle_regions: 5,
            paddle_angle_spacing: 30.0,
            paddle_sensor_pairs: 5,

            max_free_point_attempts: 10_000,
        }
    }
}

impl PhysicsTuning {
    /// Parse and validate tuning from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would break the stepping rules
    pub fn validate(&self) -> Result<()> {
        if !(self.vertex_tolerance >= 0.0) {
            return Err(Error::Tuning(format!(
                "vertex_tolerance must be non-negative, got {}",
                self.vertex_tolerance
            )));
        }
        if self.backoff_cap < 0.0 || self.backoff_cap > self.backoff_base {
            return Err(Error::Tuning(format!(
                "backoff_cap {} must lie in [0, backoff_base {}]",
                self.backoff_cap, self.backoff_base
            )));
        }
        if !(self.backoff_base > 0.0 && self.backoff_base <= 1.0) {
            return Err(Error::Tuning(format!(
                "backoff_base must lie in (0, 1], got {}",
                self.backoff_base
            )));
        }
        if self.backoff_speed_factor < 0.0 || self.minimum_movement < 0.0 {
            return Err(Error::Tuning(
                "backoff_speed_factor and minimum_movement must be non-negative".into(),
            ));
        }
        if self.paddle_regions == 0 {
            return Err(Error::Tuning("paddle_regions must be at least 1".into()));
        }
        if !(self.paddle_angle_spacing > 0.0) {
            return Err(Error::Tuning(format!(
                "paddle_angle_spacing must be positive, got {}",
                self.paddle_angle_spacing
            )));
        }
        if self.max_free_point_attempts == 0 {
            return Err(Error::Tuning(
                "max_free_point_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Fraction of the way to an impact point a ball advances
    ///
    /// `backoff_base - min(backoff_cap, speed * dt * backoff_speed_factor)`
    pub fn backoff_fraction(&self, speed: f64, dt: f64) -> f64 {
        self.backoff_base - self.backoff_cap.min(speed * dt * self.backoff_speed_factor)
    }
}
