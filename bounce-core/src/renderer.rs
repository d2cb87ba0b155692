//! Rendering contract
//!
//! The simulation only pushes scene objects and position updates through the
//! [`Renderer`] trait; concrete backends live outside this crate.

use glam::DVec3;
use thiserror::Error;

/// Renderer failure
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("renderer failed to initialize: {0}")]
    Initialize(String),
    #[error("failed to create scene object: {0}")]
    CreateObject(String),
    #[error("failed to update object {handle:?}: {message}")]
    Update { handle: ObjectHandle, message: String },
    #[error("renderer failed to shut down: {0}")]
    Shutdown(String),
    #[error("unknown object handle {0:?}")]
    UnknownHandle(ObjectHandle),
    #[error("render session is already closed")]
    Closed,
    #[error("render backend I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Primitive shape of a scene object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Box,
    Sphere,
}

/// Extent of a scene object
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Size {
    /// Axis-aligned box: `length` along x, `height` along y, `width` along z
    Box { length: f64, height: f64, width: f64 },
    Sphere { radius: f64 },
}

impl Size {
    pub fn cube(edge: f64) -> Self {
        Size::Box {
            length: edge,
            height: edge,
            width: edge,
        }
    }
}

/// RGB colour, components in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const CYAN: Color = Color::rgb(0.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Components scaled to 8-bit channels
    pub fn to_rgb8(self) -> [u8; 3] {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.r), channel(self.g), channel(self.b)]
    }
}

/// Identifies a dynamic object created by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectHandle(pub usize);

/// Sink for scene objects and per-tick position updates
pub trait Renderer {
    fn initialize(&mut self) -> Result<(), RenderError>;

    /// Add an object that never moves (ground pad, reference marker)
    fn create_static_prop(
        &mut self,
        shape: Shape,
        position: DVec3,
        size: Size,
        color: Color,
    ) -> Result<(), RenderError>;

    fn create_dynamic_object(
        &mut self,
        shape: Shape,
        initial_position: DVec3,
        size: Size,
        color: Color,
    ) -> Result<ObjectHandle, RenderError>;

    fn update_position(&mut self, handle: ObjectHandle, position: DVec3)
        -> Result<(), RenderError>;

    fn shutdown(&mut self) -> Result<(), RenderError>;
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn initialize(&mut self) -> Result<(), RenderError> {
        (**self).initialize()
    }

    fn create_static_prop(
        &mut self,
        shape: Shape,
        position: DVec3,
        size: Size,
        color: Color,
    ) -> Result<(), RenderError> {
        (**self).create_static_prop(shape, position, size, color)
    }

    fn create_dynamic_object(
        &mut self,
        shape: Shape,
        initial_position: DVec3,
        size: Size,
        color: Color,
    ) -> Result<ObjectHandle, RenderError> {
        (**self).create_dynamic_object(shape, initial_position, size, color)
    }

    fn update_position(
        &mut self,
        handle: ObjectHandle,
        position: DVec3,
    ) -> Result<(), RenderError> {
        (**self).update_position(handle, position)
    }

    fn shutdown(&mut self) -> Result<(), RenderError> {
        (**self).shutdown()
    }
}

/// An initialized renderer that is shut down exactly once.
///
/// Call [`RenderSession::close`] to observe the shutdown result. If the
/// session is dropped while still open (early return, panic), shutdown runs
/// from `Drop` and a failure is logged.
#[derive(Debug)]
pub struct RenderSession<R: Renderer> {
    renderer: Option<R>,
}

impl<R: Renderer> RenderSession<R> {
    /// Initialize `renderer`. If that fails nothing was acquired and no
    /// shutdown is attempted.
    pub fn open(mut renderer: R) -> Result<Self, RenderError> {
        renderer.initialize()?;
        Ok(Self {
            renderer: Some(renderer),
        })
    }

    pub fn is_open(&self) -> bool {
        self.renderer.is_some()
    }

    pub fn renderer(&self) -> Result<&R, RenderError> {
        self.renderer.as_ref().ok_or(RenderError::Closed)
    }

    pub fn renderer_mut(&mut self) -> Result<&mut R, RenderError> {
        self.renderer.as_mut().ok_or(RenderError::Closed)
    }

    /// Shut the renderer down and return it
    pub fn close(mut self) -> Result<R, RenderError> {
        let mut renderer = self.renderer.take().ok_or(RenderError::Closed)?;
        renderer.shutdown()?;
        Ok(renderer)
    }
}

impl<R: Renderer> Drop for RenderSession<R> {
    fn drop(&mut self) {
        if let Some(mut renderer) = self.renderer.take() {
            if let Err(e) = renderer.shutdown() {
                log::error!("renderer shutdown failed: {}", e);
            }
        }
    }
}
