//! Recording surface
//!
//! Captures draw calls instead of rasterizing them. Used by the headless binary
//! and by tests that compare frames.

use glam::Vec2;
use serde::Serialize;

use super::Surface;
use crate::Color;

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    Save,
    Restore,
    Translate { offset: Vec2 },
    ClearRect { min: Vec2, size: Vec2 },
    FillRect { min: Vec2, size: Vec2, color: Color },
    StrokeRect { min: Vec2, size: Vec2, color: Color, line_width: f32 },
    FillCircle { center: Vec2, radius: f32, color: Color },
    StrokeCircle { center: Vec2, radius: f32, color: Color, line_width: f32 },
    FillPolygon { points: Vec<Vec2>, color: Color },
    FillText { text: String, at: Vec2, size_px: f32, color: Color },
    SetGlow { blur: f32, color: Color },
    SetAlpha { alpha: f32 },
}

/// A [`Surface`] that remembers what was drawn
#[derive(Debug, Clone, Default)]
pub struct CommandRecorder {
    size: Vec2,
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    pub fn resize(&mut self, size: Vec2) {
        self.size = size;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Forget everything recorded so far
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }

    /// Recorded frame as JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.commands)
    }
}

impl Surface for CommandRecorder {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, offset: Vec2) {
        self.commands.push(DrawCommand::Translate { offset });
    }

    fn clear_rect(&mut self, min: Vec2, size: Vec2) {
        self.commands.push(DrawCommand::ClearRect { min, size });
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCommand::FillRect { min, size, color });
    }

    fn stroke_rect(&mut self, min: Vec2, size: Vec2, color: Color, line_width: f32) {
        self.commands.push(DrawCommand::StrokeRect {
            min,
            size,
            color,
            line_width,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, line_width: f32) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            color,
            line_width,
        });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        self.commands.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            color,
        });
    }

    fn fill_text(&mut self, text: &str, at: Vec2, size_px: f32, color: Color) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            at,
            size_px,
            color,
        });
    }

    fn set_glow(&mut self, blur: f32, color: Color) {
        self.commands.push(DrawCommand::SetGlow { blur, color });
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.commands.push(DrawCommand::SetAlpha { alpha });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut rec = CommandRecorder::new(Vec2::new(100.0, 100.0));
        rec.save();
        rec.fill_rect(Vec2::ZERO, Vec2::ONE, [1.0; 4]);
        rec.restore();
        assert_eq!(rec.commands().len(), 3);
        assert_eq!(rec.commands()[0], DrawCommand::Save);
        assert_eq!(rec.count(|c| matches!(c, DrawCommand::FillRect { .. })), 1);

        let json = rec.to_json().unwrap();
        assert!(json.contains("FillRect"));

        rec.reset();
        assert!(rec.commands().is_empty());
    }
}
