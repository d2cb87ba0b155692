//! Headless renderer that prints the ball's trajectory as text

use bounce_core::{Color, DVec3, ObjectHandle, RenderError, Renderer, Shape, Size};
use std::io::Write;

/// Writes one `tick x y z` line for every `stride`-th position update
pub struct TraceRenderer<W: Write> {
    out: W,
    stride: u64,
    updates: u64,
    objects: usize,
}

impl<W: Write> TraceRenderer<W> {
    /// A `stride` of 0 prints every update, same as 1
    pub fn new(out: W, stride: u64) -> Self {
        Self {
            out,
            stride: stride.max(1),
            updates: 0,
            objects: 0,
        }
    }
}

impl<W: Write> Renderer for TraceRenderer<W> {
    fn initialize(&mut self) -> Result<(), RenderError> {
        writeln!(self.out, "# tick x y z")?;
        Ok(())
    }

    fn create_static_prop(
        &mut self,
        shape: Shape,
        position: DVec3,
        size: Size,
        color: Color,
    ) -> Result<(), RenderError> {
        log::debug!(
            "static {:?} at {} size {:?} colour {:?}",
            shape,
            position,
            size,
            color
        );
        Ok(())
    }

    fn create_dynamic_object(
        &mut self,
        shape: Shape,
        initial_position: DVec3,
        size: Size,
        color: Color,
    ) -> Result<ObjectHandle, RenderError> {
        let handle = ObjectHandle(self.objects);
        self.objects += 1;
        log::debug!(
            "dynamic {:?} {:?} at {} size {:?} colour {:?}",
            handle,
            shape,
            initial_position,
            size,
            color
        );
        Ok(handle)
    }

    fn update_position(
        &mut self,
        handle: ObjectHandle,
        position: DVec3,
    ) -> Result<(), RenderError> {
        if handle.0 >= self.objects {
            return Err(RenderError::UnknownHandle(handle));
        }
        let tick = self.updates;
        self.updates += 1;
        if tick % self.stride == 0 {
            writeln!(
                self.out,
                "{} {:.4} {:.4} {:.4}",
                tick, position.x, position.y, position.z
            )?;
        }
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), RenderError> {
        self.out.flush()?;
        Ok(())
    }
}
