//! Drawing seam between the particle field and whatever paints pixels.
//!
//! The browser binding implements [`Surface`] over a 2D canvas context;
//! [`RecordingSurface`] keeps the calls in memory so frames can be inspected.

use glam::Vec2;

/// Straight (non-premultiplied) color with alpha in [0,1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(rgb: [u8; 3], a: f32) -> Self {
        Self { r: rgb[0], g: rgb[1], b: rgb[2], a }
    }

    /// CSS `rgba()` notation, as accepted by canvas style setters.
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Rgba,
}

pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    /// Resize the backing store. Implementations may clear their contents.
    fn resize(&mut self, width: f32, height: f32);

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32);

    /// Stroke a line whose color follows a linear gradient from `from` to `to`.
    fn stroke_gradient_line(&mut self, from: Vec2, to: Vec2, stops: &[GradientStop], width: f32);

    /// Fill a circle, then fill it again with a soft shadow of `shadow_blur` px.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba, shadow: Rgba, shadow_blur: f32);
}

/// One recorded call on a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    FillRect { origin: Vec2, size: Vec2, color: Rgba },
    Line { from: Vec2, to: Vec2, color: Rgba, width: f32 },
    GradientLine { from: Vec2, to: Vec2, stops: Vec<GradientStop>, width: f32 },
    Circle { center: Vec2, radius: f32, color: Rgba, shadow: Rgba, shadow_blur: f32 },
}

/// In-memory surface that records every draw call.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height, commands: Vec::new() }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn count<F: Fn(&DrawCommand) -> bool>(&self, pred: F) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }

    pub fn circles(&self) -> usize {
        self.count(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    pub fn gradient_lines(&self) -> usize {
        self.count(|c| matches!(c, DrawCommand::GradientLine { .. }))
    }

    pub fn pointer_lines(&self) -> usize {
        self.count(|c| matches!(c, DrawCommand::Line { .. }))
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.commands.clear();
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { origin, size, color });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32) {
        self.commands.push(DrawCommand::Line { from, to, color, width });
    }

    fn stroke_gradient_line(&mut self, from: Vec2, to: Vec2, stops: &[GradientStop], width: f32) {
        self.commands.push(DrawCommand::GradientLine {
            from,
            to,
            stops: stops.to_vec(),
            width,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba, shadow: Rgba, shadow_blur: f32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            shadow,
            shadow_blur,
        });
    }
}
