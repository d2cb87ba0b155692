//! Impact velocity calibration
//!
//! The bounce window is sized from the speed the ball reaches at the floor.
//! These helpers produce that number ahead of a run; a running simulation
//! never recomputes it.

use crate::config::{require_positive, ConfigError};
use crate::integrator::integrate;
use crate::state::SimulationState;
use glam::DVec3;

/// Speed at the floor for a drop from rest: `sqrt(2 g h)`
pub fn analytic_impact_velocity(
    initial_height: f64,
    gravitational_acceleration: f64,
) -> Result<f64, ConfigError> {
    require_positive("initial_height", initial_height)?;
    require_positive("gravitational_acceleration", gravitational_acceleration)?;
    Ok((2.0 * gravitational_acceleration * initial_height).sqrt())
}

/// Drop the ball from rest with a fixed step and no floor, and report its
/// speed on the first step that reaches height zero.
///
/// Fails with [`ConfigError::StepTooSmall`] if a step leaves the height
/// unchanged, which happens once `velocity * dt` is lost to rounding.
pub fn measure_impact_velocity(
    initial_height: f64,
    gravitational_acceleration: f64,
    dt: f64,
) -> Result<f64, ConfigError> {
    require_positive("initial_height", initial_height)?;
    require_positive("gravitational_acceleration", gravitational_acceleration)?;
    require_positive("dt", dt)?;

    let mut state = SimulationState::new(
        DVec3::new(0.0, initial_height, 0.0),
        0.0,
        -gravitational_acceleration,
    );
    while state.height() > 0.0 {
        let next = integrate(state, dt);
        // No visible progress: dt is lost to rounding against the height
        if next.height() >= state.height() {
            return Err(ConfigError::StepTooSmall {
                dt,
                height: state.height(),
            });
        }
        state = next;
    }
    Ok(state.velocity.abs())
}
