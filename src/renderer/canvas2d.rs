//! Browser 2D context backend

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Canvas, Color, Label};

/// [`Canvas`] over a `<canvas>` element's 2D context
pub struct Canvas2d {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Canvas2d {
    /// Wrap a canvas element, or `None` if it has no 2D context
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    /// Match the backing store to the viewport
    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }
}

impl Canvas for Canvas2d {
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32) {
        self.ctx.save();
        self.ctx.begin_path();
        self.ctx.set_fill_style_str(&color.to_css());
        // Negative radii throw in the browser
        let radius = radius.max(0.0) as f64;
        if let Err(e) = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius, 0.0, std::f64::consts::TAU)
        {
            log::warn!("arc failed: {:?}", e);
        }
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
        self.ctx.fill();
        self.ctx.close_path();
        self.ctx.restore();
    }

    fn fill_text(&mut self, label: &Label<'_>) {
        self.ctx.save();
        self.ctx.set_global_alpha(label.alpha.clamp(0.0, 1.0) as f64);
        self.ctx.set_fill_style_str(&label.color.to_css());
        self.ctx.set_font(&format!("{}px Arial", label.size));
        self.ctx.set_text_align(label.align.as_str());
        if let Err(e) = self
            .ctx
            .fill_text(label.text, label.pos.x as f64, label.pos.y as f64)
        {
            log::warn!("fill_text failed: {:?}", e);
        }
        self.ctx.restore();
    }
}
