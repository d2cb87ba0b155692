//! Unit tests for the Euler integrator and its bounce rule

use bounce_core::integrator::{advance, bounce_window, integrate, step};
use bounce_core::tests::test_helpers::approx_eq;
use bounce_core::{SimulationConfig, SimulationState};
use glam::DVec3;
use proptest::prelude::*;

fn state_at(height: f64, velocity: f64) -> SimulationState {
    SimulationState::new(DVec3::new(0.0, height, 0.0), velocity, -9.8)
}

#[test]
fn test_first_coarse_step_from_rest() {
    let config = SimulationConfig::default();
    let state = SimulationState::initial(&config);

    let next = advance(state, 1.0, &config);

    // v = 0 + (-9.8)(1.0), h = 100 + (-9.8)(1.0); 90.2 is above the 44.2 window
    assert!(approx_eq(next.velocity, -9.8, 1e-12));
    assert!(approx_eq(next.height(), 90.2, 1e-12));
}

#[test]
fn test_bounce_near_floor() {
    let config = SimulationConfig::default();
    let state = state_at(40.0, -40.0);

    let next = step(state, 0.5, &config);

    // v = -44.9, candidate h = 17.55 <= 22.1, so v -> 44.9 and h = 17.55 + 22.45
    assert!(next.bounced);
    assert!(approx_eq(next.state.velocity, 44.9, 1e-9));
    assert!(approx_eq(next.state.height(), 40.0, 1e-9));
}

#[test]
fn test_bounce_on_window_edge() {
    // Candidate height lands exactly on the window: inclusive comparison bounces
    let config = SimulationConfig::from_secs(100.0, 2.0, 20.0, 4.0).unwrap();
    let state = SimulationState::new(DVec3::new(0.0, 8.0, 0.0), -2.0, -2.0);

    // v = -4, h = 8 - 4 = 4, window = 4
    let next = step(state, 1.0, &config);
    assert!(next.bounced);
    assert_eq!(next.state.velocity, 4.0);
    assert_eq!(next.state.height(), 8.0);
}

#[test]
fn test_zero_dt_is_identity() {
    let config = SimulationConfig::default();
    let state = SimulationState::new(DVec3::new(3.0, 12.5, -7.0), -6.0, -9.8);
    assert_eq!(advance(state, 0.0, &config), state);
}

#[test]
fn test_long_run_keeps_bouncing() {
    let config = SimulationConfig::default();
    let mut state = SimulationState::initial(&config);
    let mut bounces = 0;
    for _ in 0..5000 {
        let next = step(state, 0.01, &config);
        if next.bounced {
            bounces += 1;
        }
        state = next.state;
        assert!(state.height() > 0.0, "ball went through the floor");
        assert!(state.height() <= 100.0 + 1e-6, "ball gained energy");
    }
    // 50 simulated seconds, one bounce roughly every 9 seconds
    assert!(bounces >= 5, "only {} bounces", bounces);
}

proptest! {
    #[test]
    fn prop_free_fall_follows_euler(
        height in 0.0f64..1000.0,
        velocity in -100.0f64..100.0,
        dt in 0.0001f64..1.0,
    ) {
        let config = SimulationConfig::default();
        let state = state_at(height, velocity);
        let expected_v = velocity + state.acceleration * dt;
        let expected_h = height + expected_v * dt;
        prop_assume!(expected_h > bounce_window(dt, &config));

        let next = step(state, dt, &config);
        prop_assert!(!next.bounced);
        prop_assert_eq!(next.state.velocity, expected_v);
        prop_assert_eq!(next.state.height(), expected_h);
    }

    #[test]
    fn prop_bounce_reverses_candidate(
        height in 0.0f64..20.0,
        velocity in -60.0f64..0.0,
        dt in 0.001f64..1.0,
    ) {
        let config = SimulationConfig::default();
        let state = state_at(height, velocity);
        let candidate = integrate(state, dt);
        prop_assume!(candidate.height() <= bounce_window(dt, &config));

        let next = step(state, dt, &config);
        prop_assert!(next.bounced);
        prop_assert_eq!(next.state.velocity, -candidate.velocity);
        prop_assert_eq!(next.state.velocity.abs(), candidate.velocity.abs());
        prop_assert_eq!(
            next.state.height(),
            candidate.height() + next.state.velocity * dt
        );
    }

    #[test]
    fn prop_horizontal_position_never_changes(
        x in -100.0f64..100.0,
        z in -100.0f64..100.0,
        dts in prop::collection::vec(0.0f64..0.5, 1..200),
    ) {
        let config = SimulationConfig::default();
        let mut state = SimulationState::new(DVec3::new(x, 100.0, z), 0.0, config.acceleration());
        for dt in dts {
            state = advance(state, dt, &config);
            prop_assert_eq!(state.position.x, x);
            prop_assert_eq!(state.position.z, z);
            prop_assert_eq!(state.acceleration, config.acceleration());
        }
    }

    #[test]
    fn prop_zero_dt_changes_nothing(
        height in 0.001f64..1000.0,
        velocity in -100.0f64..100.0,
    ) {
        let config = SimulationConfig::default();
        let state = state_at(height, velocity);
        prop_assert_eq!(advance(state, 0.0, &config), state);
    }
}
