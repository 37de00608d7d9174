//! 2D drawing surface abstraction
//!
//! The subset of the canvas 2D context the game draws with. The browser
//! canvas implements it in `platform::canvas`; `Recorder` implements it
//! headlessly for tests and the native build.

use glam::{Affine2, Vec2};

/// Immediate-mode 2D drawing with a transform stack
pub trait Surface {
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f32, y: f32);
    fn rotate(&mut self, angle: f32);
    fn scale(&mut self, x: f32, y: f32);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn arc(&mut self, x: f32, y: f32, radius: f32, start: f32, end: f32);
    /// Fill the current path
    fn fill(&mut self, color: &str);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: &str);
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn set_line_width(&mut self, width: f32);
}

/// A recorded drawing operation; positions are in screen space
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Clear,
    /// Arc center after the current transform
    Arc { center: Vec2, radius: f32 },
    Fill(String),
    FillRect { origin: Vec2, color: String },
    LineWidth(f32),
}

/// Surface that records fills and tracks the current transform
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub ops: Vec<Op>,
    transform: Affine2,
    stack: Vec<Affine2>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a point through the current transform
    pub fn to_screen(&self, point: Vec2) -> Vec2 {
        self.transform.transform_point2(point)
    }

    /// Colors of every fill, in order
    pub fn fills(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            Op::Fill(color) => Some(color.as_str()),
            _ => None,
        })
    }

    /// Depth of the save/restore stack (0 when balanced)
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
        self.stack.clear();
        self.transform = Affine2::IDENTITY;
    }
}

impl Surface for Recorder {
    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(transform) = self.stack.pop() {
            self.transform = transform;
        }
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.transform = self.transform * Affine2::from_translation(Vec2::new(x, y));
    }

    fn rotate(&mut self, angle: f32) {
        self.transform = self.transform * Affine2::from_angle(angle);
    }

    fn scale(&mut self, x: f32, y: f32) {
        self.transform = self.transform * Affine2::from_scale(Vec2::new(x, y));
    }

    fn begin_path(&mut self) {}

    fn move_to(&mut self, _x: f32, _y: f32) {}

    fn arc(&mut self, x: f32, y: f32, radius: f32, _start: f32, _end: f32) {
        let center = self.to_screen(Vec2::new(x, y));
        // Radius scaled by the x axis; exact for uniform scales
        let radius = radius * self.transform.matrix2.x_axis.length();
        self.ops.push(Op::Arc { center, radius });
    }

    fn fill(&mut self, color: &str) {
        self.ops.push(Op::Fill(color.to_string()));
    }

    fn fill_rect(&mut self, x: f32, y: f32, _width: f32, _height: f32, color: &str) {
        let origin = self.to_screen(Vec2::new(x, y));
        self.ops.push(Op::FillRect {
            origin,
            color: color.to_string(),
        });
    }

    fn clear_rect(&mut self, _x: f32, _y: f32, _width: f32, _height: f32) {
        self.ops.push(Op::Clear);
    }

    fn set_line_width(&mut self, width: f32) {
        self.ops.push(Op::LineWidth(width));
    }
}
