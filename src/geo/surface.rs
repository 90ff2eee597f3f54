//! Drawing surface abstraction and its egui-backed implementation.

use eframe::egui::{Color32, Painter, Pos2, Rect, Shape, Stroke, Vec2};

use super::projection::Pixel;

/// Minimal 2D drawing target used by the renderer.
pub trait DrawingSurface {
    /// Fills the whole surface with a color, discarding previous content.
    fn clear(&mut self, color: Color32);

    fn draw_line(&mut self, from: Pixel, to: Pixel, color: Color32, width: f32);

    fn draw_filled_circle(&mut self, center: Pixel, radius: f32, color: Color32);

    /// Makes everything drawn since the last `clear` visible.
    fn present(&mut self);
}

/// Double-buffered shape list painted by the canvas.
///
/// Drawing calls record egui shapes into a back buffer in surface-local
/// coordinates; `present` swaps it to the front. The canvas replays the front
/// buffer every frame, so the projection and render pass only runs when the
/// view actually changes.
#[derive(Default)]
pub struct ShapeSurface {
    size: Vec2,
    back: Vec<Shape>,
    front: Vec<Shape>,
    presented_frames: u64,
}

impl ShapeSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resize(&mut self, size: Vec2) {
        self.size = size;
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Number of completed `present` calls.
    pub fn presented_frames(&self) -> u64 {
        self.presented_frames
    }

    /// Paints the front buffer with its top-left corner at `origin`.
    pub fn paint(&self, painter: &Painter, origin: Pos2) {
        let offset = origin.to_vec2();
        painter.extend(self.front.iter().cloned().map(|mut shape| {
            shape.translate(offset);
            shape
        }));
    }
}

fn to_pos(pixel: Pixel) -> Pos2 {
    Pos2::new(pixel.x as f32, pixel.y as f32)
}

impl DrawingSurface for ShapeSurface {
    fn clear(&mut self, color: Color32) {
        self.back.clear();
        self.back.push(Shape::rect_filled(
            Rect::from_min_size(Pos2::ZERO, self.size),
            0.0,
            color,
        ));
    }

    fn draw_line(&mut self, from: Pixel, to: Pixel, color: Color32, width: f32) {
        self.back.push(Shape::line_segment(
            [to_pos(from), to_pos(to)],
            Stroke::new(width, color),
        ));
    }

    fn draw_filled_circle(&mut self, center: Pixel, radius: f32, color: Color32) {
        self.back
            .push(Shape::circle_filled(to_pos(center), radius, color));
    }

    fn present(&mut self) {
        std::mem::swap(&mut self.front, &mut self.back);
        self.back.clear();
        self.presented_frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_swaps_buffers() {
        let mut surface = ShapeSurface::new();
        surface.resize(Vec2::new(100.0, 50.0));

        surface.clear(Color32::BLACK);
        surface.draw_line(
            Pixel { x: 0, y: 0 },
            Pixel { x: 10, y: 10 },
            Color32::WHITE,
            2.0,
        );
        surface.draw_filled_circle(Pixel { x: 5, y: 5 }, 3.0, Color32::RED);
        assert!(surface.front.is_empty());
        assert_eq!(surface.back.len(), 3);

        surface.present();
        assert_eq!(surface.front.len(), 3);
        assert!(surface.back.is_empty());
        assert_eq!(surface.presented_frames(), 1);
    }

    #[test]
    fn test_clear_discards_unpresented_shapes() {
        let mut surface = ShapeSurface::new();
        surface.clear(Color32::BLACK);
        surface.draw_filled_circle(Pixel { x: 1, y: 1 }, 3.0, Color32::RED);
        surface.clear(Color32::BLACK);

        assert_eq!(surface.back.len(), 1);
    }
}
