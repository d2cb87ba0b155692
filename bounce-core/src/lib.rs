pub mod calibration;
pub mod clock;
pub mod config;
pub mod integrator;
pub mod renderer;
pub mod runtime;
pub mod scene;
pub mod state;

pub use clock::{ClockSample, ClockSampler, ManualClock, MonotonicClock, TimeSource};
pub use config::{consts, ConfigError, SimulationConfig};
pub use integrator::{advance, bounce_window, step, Step};
pub use renderer::{Color, ObjectHandle, RenderError, RenderSession, Renderer, Shape, Size};
pub use runtime::{run, Simulation, SimulationError, SimulationReport, TickOutcome};
pub use scene::{SceneLayout, ViewFrame};
pub use state::SimulationState;

pub use glam::DVec3;
