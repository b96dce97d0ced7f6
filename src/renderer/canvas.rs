//! Canvas 2D backend (WASM only)

use glam::Vec2;
use web_sys::CanvasRenderingContext2d;

use super::Surface;
use crate::Color;

/// CSS `rgba()` string for a linear [0, 1] color
fn css(color: Color) -> String {
    format!(
        "rgba({}, {}, {}, {})",
        (color[0].clamp(0.0, 1.0) * 255.0).round() as u8,
        (color[1].clamp(0.0, 1.0) * 255.0).round() as u8,
        (color[2].clamp(0.0, 1.0) * 255.0).round() as u8,
        color[3].clamp(0.0, 1.0)
    )
}

/// Draws straight into a browser canvas
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    size: Vec2,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d, size: Vec2) -> Self {
        Self { ctx, size }
    }

    pub fn resize(&mut self, size: Vec2) {
        self.size = size;
    }

    fn path(&self, points: &[Vec2]) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.close_path();
    }

    fn circle(&self, center: Vec2, radius: f32) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius.max(0.0) as f64,
            0.0,
            std::f64::consts::TAU,
        );
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, offset: Vec2) {
        let _ = self.ctx.translate(offset.x as f64, offset.y as f64);
    }

    fn clear_rect(&mut self, min: Vec2, size: Vec2) {
        self.ctx
            .clear_rect(min.x as f64, min.y as f64, size.x as f64, size.y as f64);
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color) {
        self.ctx.set_fill_style_str(&css(color));
        self.ctx
            .fill_rect(min.x as f64, min.y as f64, size.x as f64, size.y as f64);
    }

    fn stroke_rect(&mut self, min: Vec2, size: Vec2, color: Color, line_width: f32) {
        self.ctx.set_stroke_style_str(&css(color));
        self.ctx.set_line_width(line_width as f64);
        self.ctx
            .stroke_rect(min.x as f64, min.y as f64, size.x as f64, size.y as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.ctx.set_fill_style_str(&css(color));
        self.circle(center, radius);
        self.ctx.fill();
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, line_width: f32) {
        self.ctx.set_stroke_style_str(&css(color));
        self.ctx.set_line_width(line_width as f64);
        self.circle(center, radius);
        self.ctx.stroke();
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        self.ctx.set_fill_style_str(&css(color));
        self.path(points);
        self.ctx.fill();
    }

    fn fill_text(&mut self, text: &str, at: Vec2, size_px: f32, color: Color) {
        self.ctx.set_fill_style_str(&css(color));
        self.ctx.set_font(&format!("bold {}px monospace", size_px));
        self.ctx.set_text_align("center");
        let _ = self.ctx.fill_text(text, at.x as f64, at.y as f64);
    }

    fn set_glow(&mut self, blur: f32, color: Color) {
        self.ctx.set_shadow_blur(blur as f64);
        self.ctx.set_shadow_color(&css(color));
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
    }
}
