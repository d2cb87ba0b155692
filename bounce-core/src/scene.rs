use crate::config::SimulationConfig;
use crate::renderer::{Color, ObjectHandle, RenderError, Renderer, Shape, Size};
use glam::DVec3;

/// Dimensions and colours of the fixed scene and the ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneLayout {
    pub ball_radius: f64,
    pub ball_color: Color,
    /// Landing pad length (x), height (y) and width (z)
    pub pad_size: [f64; 3],
    pub pad_color: Color,
    /// Edge of the cube marking the starting height
    pub marker_size: f64,
    pub marker_color: Color,
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self {
            ball_radius: 2.0,
            ball_color: Color::RED,
            pad_size: [50.0, 0.5, 50.0],
            pad_color: Color::BLUE,
            marker_size: 5.0,
            marker_color: Color::CYAN,
        }
    }
}

impl SceneLayout {
    /// Create the landing pad, the start marker and the ball.
    /// Returns the handle of the ball.
    pub fn build<R: Renderer + ?Sized>(
        &self,
        renderer: &mut R,
        start: DVec3,
    ) -> Result<ObjectHandle, RenderError> {
        let [length, height, width] = self.pad_size;
        renderer.create_static_prop(
            Shape::Box,
            DVec3::ZERO,
            Size::Box {
                length,
                height,
                width,
            },
            self.pad_color,
        )?;

        let ball = renderer.create_dynamic_object(
            Shape::Sphere,
            start,
            Size::Sphere {
                radius: self.ball_radius,
            },
            self.ball_color,
        )?;

        // An elastic bounce should bring the ball back to this marker every time
        renderer.create_static_prop(
            Shape::Box,
            start,
            Size::cube(self.marker_size),
            self.marker_color,
        )?;

        Ok(ball)
    }
}

/// Side-view camera framing the whole trajectory
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewFrame {
    /// World-space point at the centre of the view
    pub center: DVec3,
    /// Half of the visible extent, in world units
    pub range: f64,
}

impl ViewFrame {
    pub fn for_config(config: &SimulationConfig) -> Self {
        let half_height = config.initial_height() / 2.0;
        Self {
            center: DVec3::new(0.0, half_height, 0.0),
            range: half_height + 20.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_view_frame() {
        let frame = ViewFrame::for_config(&SimulationConfig::default());
        assert_eq!(frame.center, DVec3::new(0.0, 50.0, 0.0));
        assert_eq!(frame.range, 70.0);
    }
}
