//! Simulation configuration
//!
//! A `SimulationConfig` is validated once when it is built and is read-only
//! afterwards; the running simulation never mutates it.

use std::time::Duration;
use thiserror::Error;

/// Default configuration constants
pub mod consts {
    /// Starting height of the ball above the ground plane (length units)
    pub const INITIAL_HEIGHT: f64 = 100.0;
    /// Magnitude of the constant downward acceleration (units/s²)
    pub const GRAVITATIONAL_ACCELERATION: f64 = 9.8;
    /// Wall-clock length of a run, in seconds
    pub const TOTAL_DURATION_SECS: u64 = 20;
    /// Impact velocity measured for a fall from `INITIAL_HEIGHT` (units/s).
    /// Sizes the bounce window.
    pub const MAX_OBSERVED_IMPACT_VELOCITY: f64 = 44.2;
}

/// Rejected configuration value
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a finite number, got {value}")]
    NonFinite { name: &'static str, value: f64 },
    #[error("{name} must be greater than zero, got {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("{name} is not a valid duration: {value} seconds")]
    InvalidDuration { name: &'static str, value: f64 },
    #[error("step {dt} is too small to move the ball from height {height}")]
    StepTooSmall { dt: f64, height: f64 },
}

/// Immutable parameters of a single run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    initial_height: f64,
    gravitational_acceleration: f64,
    total_duration: Duration,
    max_observed_impact_velocity: f64,
}

impl SimulationConfig {
    pub fn new(
        initial_height: f64,
        gravitational_acceleration: f64,
        total_duration: Duration,
        max_observed_impact_velocity: f64,
    ) -> Result<Self, ConfigError> {
        require_positive("initial_height", initial_height)?;
        require_positive("gravitational_acceleration", gravitational_acceleration)?;
        require_positive("max_observed_impact_velocity", max_observed_impact_velocity)?;
        if total_duration.is_zero() {
            return Err(ConfigError::NonPositive {
                name: "total_duration",
                value: 0.0,
            });
        }

        Ok(Self {
            initial_height,
            gravitational_acceleration,
            total_duration,
            max_observed_impact_velocity,
        })
    }

    /// Same as [`SimulationConfig::new`], with the duration given in seconds
    pub fn from_secs(
        initial_height: f64,
        gravitational_acceleration: f64,
        total_duration_secs: f64,
        max_observed_impact_velocity: f64,
    ) -> Result<Self, ConfigError> {
        let total_duration = duration_from_secs("total_duration", total_duration_secs)?;
        Self::new(
            initial_height,
            gravitational_acceleration,
            total_duration,
            max_observed_impact_velocity,
        )
    }

    pub fn initial_height(&self) -> f64 {
        self.initial_height
    }

    pub fn gravitational_acceleration(&self) -> f64 {
        self.gravitational_acceleration
    }

    /// Signed vertical acceleration applied every tick
    pub fn acceleration(&self) -> f64 {
        -self.gravitational_acceleration
    }

    pub fn total_duration(&self) -> Duration {
        self.total_duration
    }

    pub fn max_observed_impact_velocity(&self) -> f64 {
        self.max_observed_impact_velocity
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_height: consts::INITIAL_HEIGHT,
            gravitational_acceleration: consts::GRAVITATIONAL_ACCELERATION,
            total_duration: Duration::from_secs(consts::TOTAL_DURATION_SECS),
            max_observed_impact_velocity: consts::MAX_OBSERVED_IMPACT_VELOCITY,
        }
    }
}

/// Check that a value is finite and strictly positive
pub fn require_positive(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { name, value });
    }
    if value <= 0.0 {
        return Err(ConfigError::NonPositive { name, value });
    }
    Ok(value)
}

/// Convert a positive number of seconds into a `Duration`
pub fn duration_from_secs(name: &'static str, secs: f64) -> Result<Duration, ConfigError> {
    require_positive(name, secs)?;
    Duration::try_from_secs_f64(secs).map_err(|_| ConfigError::InvalidDuration { name, value: secs })
}
