//! Browser 2D canvas as a drawing surface

use web_sys::CanvasRenderingContext2d;

use crate::renderer::Surface;

// Canvas calls only fail on non-finite arguments; a dropped shape is fine.
impl Surface for CanvasRenderingContext2d {
    fn save(&mut self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&mut self) {
        CanvasRenderingContext2d::restore(self);
    }

    fn translate(&mut self, x: f32, y: f32) {
        let _ = CanvasRenderingContext2d::translate(self, x as f64, y as f64);
    }

    fn rotate(&mut self, angle: f32) {
        let _ = CanvasRenderingContext2d::rotate(self, angle as f64);
    }

    fn scale(&mut self, x: f32, y: f32) {
        let _ = CanvasRenderingContext2d::scale(self, x as f64, y as f64);
    }

    fn begin_path(&mut self) {
        CanvasRenderingContext2d::begin_path(self);
    }

    fn move_to(&mut self, x: f32, y: f32) {
        CanvasRenderingContext2d::move_to(self, x as f64, y as f64);
    }

    fn arc(&mut self, x: f32, y: f32, radius: f32, start: f32, end: f32) {
        let _ = CanvasRenderingContext2d::arc(
            self,
            x as f64,
            y as f64,
            radius as f64,
            start as f64,
            end as f64,
        );
    }

    fn fill(&mut self, color: &str) {
        self.set_fill_style_str(color);
        CanvasRenderingContext2d::fill(self);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: &str) {
        self.set_fill_style_str(color);
        CanvasRenderingContext2d::fill_rect(self, x as f64, y as f64, width as f64, height as f64);
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        CanvasRenderingContext2d::clear_rect(self, x as f64, y as f64, width as f64, height as f64);
    }

    fn set_line_width(&mut self, width: f32) {
        CanvasRenderingContext2d::set_line_width(self, width as f64);
    }
}
