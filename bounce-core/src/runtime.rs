use crate::clock::{ClockSample, ClockSampler, TimeSource};
use crate::config::{ConfigError, SimulationConfig};
use crate::integrator::step;
use crate::renderer::{ObjectHandle, RenderError, RenderSession, Renderer};
use crate::scene::SceneLayout;
use crate::state::SimulationState;
use std::time::Duration;
use thiserror::Error;

/// Failure of a simulation run
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    pub sample: ClockSample,
    pub state: SimulationState,
    pub bounced: bool,
}

/// Summary of a finished (or interrupted) run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationReport {
    pub ticks: u64,
    pub bounces: u64,
    pub elapsed: Duration,
    pub final_state: SimulationState,
    pub peak_height: f64,
}

/// A running simulation: clock, ball state and the ball's render handle
#[derive(Debug)]
pub struct Simulation<S> {
    config: SimulationConfig,
    sampler: ClockSampler<S>,
    state: SimulationState,
    ball: ObjectHandle,
    ticks: u64,
    bounces: u64,
    peak_height: f64,
}

impl<S: TimeSource> Simulation<S> {
    /// Build the scene in `session`, then start the clock
    pub fn start<R: Renderer>(
        config: SimulationConfig,
        layout: &SceneLayout,
        source: S,
        session: &mut RenderSession<R>,
    ) -> Result<Self, SimulationError> {
        let state = SimulationState::initial(&config);
        let ball = layout.build(session.renderer_mut()?, state.position)?;
        log::info!(
            "starting simulation: height {} gravity {} duration {:?}",
            config.initial_height(),
            config.gravitational_acceleration(),
            config.total_duration()
        );

        Ok(Self {
            config,
            sampler: ClockSampler::start(source),
            state,
            ball,
            ticks: 0,
            bounces: 0,
            peak_height: state.height(),
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn ball(&self) -> ObjectHandle {
        self.ball
    }

    /// True once the elapsed wall-clock time reaches the configured duration
    pub fn is_finished(&self) -> bool {
        self.sampler.elapsed() >= self.config.total_duration()
    }

    /// Sample the clock, advance the ball and push its new position to the renderer
    pub fn tick<R: Renderer>(
        &mut self,
        session: &mut RenderSession<R>,
    ) -> Result<TickOutcome, SimulationError> {
        let sample = self.sampler.sample();
        let dt = sample.dt_secs();
        let next = step(self.state, dt, &self.config);
        session
            .renderer_mut()?
            .update_position(self.ball, next.state.position)?;

        // Only ticks that reached the renderer count
        self.state = next.state;
        self.ticks += 1;
        self.peak_height = self.peak_height.max(next.state.height());
        if next.bounced {
            self.bounces += 1;
            log::debug!(
                "bounce #{} at t={:.3}s, dt={:.4}s, velocity {:.3}",
                self.bounces,
                sample.elapsed_since_start.as_secs_f64(),
                dt,
                next.state.velocity
            );
        }
        self.sampler.end_tick();

        Ok(TickOutcome {
            sample,
            state: next.state,
            bounced: next.bounced,
        })
    }

    pub fn report(&self) -> SimulationReport {
        SimulationReport {
            ticks: self.ticks,
            bounces: self.bounces,
            elapsed: self.sampler.elapsed(),
            final_state: self.state,
            peak_height: self.peak_height,
        }
    }
}

/// Main entry point: run a full simulation against `renderer`.
///
/// The renderer is initialized before the first tick and shut down after the
/// last one, also when a tick fails.
pub fn run<S: TimeSource, R: Renderer>(
    config: SimulationConfig,
    layout: &SceneLayout,
    source: S,
    renderer: R,
) -> Result<SimulationReport, SimulationError> {
    let mut session = RenderSession::open(renderer)?;

    let result = run_session(config, layout, source, &mut session);
    let shutdown = session.close();

    match (result, shutdown) {
        (Ok(report), Ok(_)) => {
            log::info!(
                "simulation finished: {} ticks, {} bounces in {:?}",
                report.ticks,
                report.bounces,
                report.elapsed
            );
            Ok(report)
        }
        (Ok(_), Err(e)) => Err(e.into()),
        (Err(e), Ok(_)) => Err(e),
        (Err(e), Err(shutdown_err)) => {
            log::warn!("renderer shutdown also failed: {}", shutdown_err);
            Err(e)
        }
    }
}

fn run_session<S: TimeSource, R: Renderer>(
    config: SimulationConfig,
    layout: &SceneLayout,
    source: S,
    session: &mut RenderSession<R>,
) -> Result<SimulationReport, SimulationError> {
    let mut simulation = Simulation::start(config, layout, source, session)?;
    while !simulation.is_finished() {
        simulation.tick(session)?;
    }
    Ok(simulation.report())
}
