use glam::Vec2;
use motion_core::error::{MotionError, Result};
use motion_core::surface::{GradientStop, Rgba, Surface};
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// [`Surface`] over a 2D canvas context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .ok_or(MotionError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| MotionError::ContextUnavailable)?;
        Ok(Self { canvas, ctx })
    }

    /// Look up a canvas by element id.
    pub fn by_id(document: &web_sys::Document, id: &str) -> Result<Self> {
        let canvas = document
            .get_element_by_id(id)
            .ok_or_else(|| MotionError::MissingSurface(id.to_string()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| MotionError::MissingSurface(format!("#{id} is not a canvas")))?;
        Self::new(canvas)
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> f32 {
        self.canvas.width() as f32
    }

    fn height(&self) -> f32 {
        self.canvas.height() as f32
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.canvas.set_width(width.max(0.0) as u32);
        self.canvas.set_height(height.max(0.0) as u32);
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba) {
        self.ctx.set_fill_style_str(&color.css());
        self.ctx
            .fill_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.set_stroke_style_str(&color.css());
        self.ctx.set_line_width(width as f64);
        self.ctx.stroke();
    }

    fn stroke_gradient_line(&mut self, from: Vec2, to: Vec2, stops: &[GradientStop], width: f32) {
        let gradient = self.ctx.create_linear_gradient(
            from.x as f64,
            from.y as f64,
            to.x as f64,
            to.y as f64,
        );
        for stop in stops {
            // Offsets are always within [0,1]; nothing useful to do on failure.
            let _ = gradient.add_color_stop(stop.offset, &stop.color.css());
        }
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.set_stroke_style_canvas_gradient(&gradient);
        self.ctx.set_line_width(width as f64);
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba, shadow: Rgba, shadow_blur: f32) {
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
            .is_err()
        {
            return;
        }
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill();

        self.ctx.set_shadow_color(&shadow.css());
        self.ctx.set_shadow_blur(shadow_blur as f64);
        self.ctx.fill();
        self.ctx.set_shadow_blur(0.0);
    }
}
