use crate::config::SimulationConfig;
use glam::DVec3;

/// Kinematic state of the falling ball
///
/// Only the vertical component of `position` moves; `x` and `z` keep the
/// values they were created with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationState {
    pub position: DVec3,
    /// Vertical velocity
    pub velocity: f64,
    /// Vertical acceleration (negative for a downward pull)
    pub acceleration: f64,
}

impl SimulationState {
    pub fn new(position: DVec3, velocity: f64, acceleration: f64) -> Self {
        Self {
            position,
            velocity,
            acceleration,
        }
    }

    /// Ball at rest at the configured starting height, above the origin
    pub fn initial(config: &SimulationConfig) -> Self {
        Self::new(
            DVec3::new(0.0, config.initial_height(), 0.0),
            0.0,
            config.acceleration(),
        )
    }

    pub fn height(&self) -> f64 {
        self.position.y
    }

    /// Copy of this state with a new height and velocity
    pub(crate) fn with_vertical(self, height: f64, velocity: f64) -> Self {
        Self {
            position: DVec3::new(self.position.x, height, self.position.z),
            velocity,
            ..self
        }
    }
}
