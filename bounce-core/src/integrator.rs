use crate::config::SimulationConfig;
use crate::state::SimulationState;

/// Result of one integration step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub state: SimulationState,
    /// True if the ball hit the floor during this step and its velocity was reversed
    pub bounced: bool,
}

/// Advance the ball by `dt` seconds, reversing it off the floor when needed
pub fn advance(state: SimulationState, dt: f64, config: &SimulationConfig) -> SimulationState {
    step(state, dt, config).state
}

/// Width of the floor-contact window for a step of `dt` seconds.
///
/// Any height sampled at or below this value counts as contact. It scales with
/// `dt` so that a coarse step can't carry the ball through the window unseen.
pub fn bounce_window(dt: f64, config: &SimulationConfig) -> f64 {
    config.max_observed_impact_velocity() * dt
}

/// Free fall only: explicit Euler, velocity first, then position with the new velocity
pub fn integrate(state: SimulationState, dt: f64) -> SimulationState {
    let velocity = state.velocity + state.acceleration * dt;
    let height = state.height() + velocity * dt;
    state.with_vertical(height, velocity)
}

/// Advance the ball by `dt` seconds and report whether it bounced
pub fn step(state: SimulationState, dt: f64, config: &SimulationConfig) -> Step {
    // No time passed, nothing moves
    if dt == 0.0 {
        return Step {
            state,
            bounced: false,
        };
    }

    let candidate = integrate(state, dt);
    if candidate.height() > bounce_window(dt, config) {
        return Step {
            state: candidate,
            bounced: false,
        };
    }

    // Elastic contact: p -> -p with constant mass, then climb back out over the same dt
    let velocity = -candidate.velocity;
    let height = candidate.height() + velocity * dt;
    Step {
        state: candidate.with_vertical(height, velocity),
        bounced: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    #[test]
    fn test_integrate_uses_updated_velocity() {
        let state = SimulationState::new(DVec3::new(0.0, 10.0, 0.0), 0.0, -2.0);
        let next = integrate(state, 1.0);
        assert_eq!(next.velocity, -2.0);
        assert_eq!(next.height(), 8.0);
    }

    #[test]
    fn test_bounce_window_scales_with_dt() {
        let config = SimulationConfig::default();
        assert_eq!(bounce_window(0.0, &config), 0.0);
        assert!((bounce_window(0.5, &config) - 22.1).abs() < 1e-12);
        assert!((bounce_window(1.0, &config) - 44.2).abs() < 1e-12);
    }

    #[test]
    fn test_step_reports_bounce() {
        let config = SimulationConfig::default();
        let state = SimulationState::new(DVec3::new(0.0, 40.0, 0.0), -40.0, -9.8);
        assert!(step(state, 0.5, &config).bounced);
        assert!(!step(state, 0.01, &config).bounced);
    }
}
