//! Windowed viewer for the bouncing ball
//!
//! Each egui frame runs one simulation tick: the clock is sampled, the ball
//! advanced and its new position pushed into a [`SceneRenderer`], which the
//! frame then paints as an orthographic side view.

use bounce_core::{
    Color, DVec3, MonotonicClock, ObjectHandle, RenderError, RenderSession, Renderer,
    SceneLayout, Shape, Simulation, SimulationConfig, SimulationError, SimulationReport, Size,
    ViewFrame,
};
use eframe::egui;
use std::sync::mpsc;

/// A shape placed in the scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub shape: Shape,
    pub position: DVec3,
    pub size: Size,
    pub color: Color,
}

/// Renderer that keeps the scene in memory for egui to paint
#[derive(Debug, Default)]
pub struct SceneRenderer {
    props: Vec<SceneObject>,
    objects: Vec<SceneObject>,
    active: bool,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn props(&self) -> &[SceneObject] {
        &self.props
    }

    fn ensure_active(&self) -> Result<(), RenderError> {
        if self.active {
            Ok(())
        } else {
            Err(RenderError::Closed)
        }
    }

    /// Paint static props first so moving objects stay on top
    pub fn paint(&self, painter: &egui::Painter, view: &ViewTransform) {
        for object in self.props().iter().chain(self.objects()) {
            let [r, g, b] = object.color.to_rgb8();
            let color = egui::Color32::from_rgb(r, g, b);
            let center = view.to_screen(object.position);
            match (object.shape, object.size) {
                (Shape::Box, Size::Box { length, height, .. }) => {
                    let size = egui::vec2(view.length(length), view.length(height));
                    painter.rect_filled(egui::Rect::from_center_size(center, size), 0.0, color);
                }
                (Shape::Sphere, Size::Sphere { radius }) => {
                    let radius = view.length(radius).max(2.0);
                    painter.circle_filled(center, radius, color);
                    painter.circle_stroke(
                        center,
                        radius,
                        egui::Stroke::new(1.0, egui::Color32::BLACK),
                    );
                }
                (shape, size) => {
                    log::warn!("cannot draw {:?} with size {:?}", shape, size);
                }
            }
        }
    }
}

impl Renderer for SceneRenderer {
    fn initialize(&mut self) -> Result<(), RenderError> {
        self.props.clear();
        self.objects.clear();
        self.active = true;
        Ok(())
    }

    fn create_static_prop(
        &mut self,
        shape: Shape,
        position: DVec3,
        size: Size,
        color: Color,
    ) -> Result<(), RenderError> {
        self.ensure_active()?;
        self.props.push(SceneObject {
            shape,
            position,
            size,
            color,
        });
        Ok(())
    }

    fn create_dynamic_object(
        &mut self,
        shape: Shape,
        initial_position: DVec3,
        size: Size,
        color: Color,
    ) -> Result<ObjectHandle, RenderError> {
        self.ensure_active()?;
        self.objects.push(SceneObject {
            shape,
            position: initial_position,
            size,
            color,
        });
        Ok(ObjectHandle(self.objects.len() - 1))
    }

    fn update_position(
        &mut self,
        handle: ObjectHandle,
        position: DVec3,
    ) -> Result<(), RenderError> {
        self.ensure_active()?;
        let object = self
            .objects
            .get_mut(handle.0)
            .ok_or(RenderError::UnknownHandle(handle))?;
        object.position = position;
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), RenderError> {
        self.active = false;
        Ok(())
    }
}

/// Maps world coordinates (x right, y up) onto a screen rectangle
#[derive(Debug, Clone, Copy)]
pub struct ViewTransform {
    screen_center: egui::Pos2,
    world_center: DVec3,
    scale: f64,
}

impl ViewTransform {
    pub fn new(rect: egui::Rect, frame: &ViewFrame) -> Self {
        let extent = rect.width().min(rect.height()) as f64;
        Self {
            screen_center: rect.center(),
            world_center: frame.center,
            scale: extent / (2.0 * frame.range),
        }
    }

    pub fn to_screen(&self, position: DVec3) -> egui::Pos2 {
        let offset = position - self.world_center;
        self.screen_center
            + egui::vec2((offset.x * self.scale) as f32, (-offset.y * self.scale) as f32)
    }

    pub fn length(&self, world: f64) -> f32 {
        (world * self.scale) as f32
    }
}

enum Phase {
    Running {
        session: RenderSession<SceneRenderer>,
        simulation: Simulation<MonotonicClock>,
    },
    Done {
        scene: Option<SceneRenderer>,
        status: String,
    },
}

/// eframe application driving the simulation one tick per frame
pub struct ViewerApp {
    phase: Phase,
    frame: ViewFrame,
    outcome: mpsc::Sender<Result<SimulationReport, SimulationError>>,
}

impl ViewerApp {
    pub fn start(
        config: SimulationConfig,
        layout: &SceneLayout,
        mut session: RenderSession<SceneRenderer>,
        outcome: mpsc::Sender<Result<SimulationReport, SimulationError>>,
    ) -> Result<Self, SimulationError> {
        let simulation = Simulation::start(config, layout, MonotonicClock::new(), &mut session)?;
        Ok(Self {
            phase: Phase::Running {
                session,
                simulation,
            },
            frame: ViewFrame::for_config(&config),
            outcome,
        })
    }

    /// Run one tick, or close the session once the run is over
    fn advance(&mut self, ctx: &egui::Context) {
        let Phase::Running {
            session,
            simulation,
        } = &mut self.phase
        else {
            return;
        };

        let result = if simulation.is_finished() {
            Some(Ok(simulation.report()))
        } else {
            simulation.tick(session).err().map(Err)
        };

        if let Some(result) = result {
            self.finish(result);
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    fn finish(&mut self, result: Result<SimulationReport, SimulationError>) {
        let phase = std::mem::replace(
            &mut self.phase,
            Phase::Done {
                scene: None,
                status: String::new(),
            },
        );
        let Phase::Running { session, .. } = phase else {
            return;
        };

        let (scene, result) = match (result, session.close()) {
            (Ok(report), Ok(scene)) => (Some(scene), Ok(report)),
            (Ok(_), Err(e)) => (None, Err(e.into())),
            (Err(e), Ok(scene)) => (Some(scene), Err(e)),
            (Err(e), Err(shutdown_err)) => {
                log::warn!("renderer shutdown also failed: {}", shutdown_err);
                (None, Err(e))
            }
        };

        let status = match &result {
            Ok(report) => format!(
                "Finished: {} ticks, {} bounces",
                report.ticks, report.bounces
            ),
            Err(e) => format!("Error: {}", e),
        };
        self.phase = Phase::Done { scene, status };

        // The receiver is gone only if main has already returned
        let _ = self.outcome.send(result);
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.advance(ctx);

        egui::TopBottomPanel::top("status").show(ctx, |ui| {
            ui.horizontal(|ui| match &self.phase {
                Phase::Running { simulation, .. } => {
                    let report = simulation.report();
                    ui.label(format!("t = {:.2} s", report.elapsed.as_secs_f64()));
                    ui.separator();
                    ui.label(format!("height = {:.2}", report.final_state.height()));
                    ui.separator();
                    ui.label(format!("velocity = {:.2}", report.final_state.velocity));
                    ui.separator();
                    ui.label(format!("bounces: {}", report.bounces));
                }
                Phase::Done { status, .. } => {
                    ui.label(status.as_str());
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let view = ViewTransform::new(ui.max_rect(), &self.frame);
            let scene = match &self.phase {
                Phase::Running { session, .. } => session.renderer().ok(),
                Phase::Done { scene, .. } => scene.as_ref(),
            };
            if let Some(scene) = scene {
                scene.paint(ui.painter(), &view);
            }
        });

        if matches!(self.phase, Phase::Running { .. }) {
            ctx.request_repaint();
        }
    }
}

/// Open the viewer window and run the simulation in it.
///
/// Returns `None` if the window was closed before the run finished.
pub fn run_viewer(
    config: SimulationConfig,
    layout: SceneLayout,
) -> Result<Option<SimulationReport>, Box<dyn std::error::Error>> {
    let session = RenderSession::open(SceneRenderer::new())?;
    let (tx, rx) = mpsc::channel();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("bounce")
            .with_inner_size([720.0, 720.0]),
        ..Default::default()
    };
    eframe::run_native(
        "bounce",
        options,
        Box::new(
            move |_cc: &eframe::CreationContext<'_>| -> Result<
                Box<dyn eframe::App>,
                Box<dyn std::error::Error + Send + Sync>,
            > {
                let app = ViewerApp::start(config, &layout, session, tx)?;
                Ok(Box::new(app))
            },
        ),
    )?;

    match rx.try_recv() {
        Ok(result) => Ok(Some(result?)),
        Err(_) => {
            log::info!("viewer closed before the simulation finished");
            Ok(None)
        }
    }
}
