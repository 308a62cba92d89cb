//! Normalized unit square (y-up) ↔ preview pixels (y-down).
//!
//! The geometry model never flips y. The flip happens here, once, on the
//! way to a y-down surface.

use kurbo::{Point, Rect, Size};
use ss_core::{Canvas, NormRect};

/// Pixel rectangle for a normalized rectangle on a `pixels`-sized surface.
pub fn to_pixel_rect(rect: &NormRect, pixels: Size) -> Rect {
    let y = 1.0 - rect.center_y;
    let x0 = (rect.center_x - rect.width / 2.0) * pixels.width;
    let y0 = (y - rect.height / 2.0) * pixels.height;
    Rect::new(
        x0,
        y0,
        x0 + rect.width * pixels.width,
        y0 + rect.height * pixels.height,
    )
}

/// Inverse of the flip for a single point: pixel → normalized `(x, y)`.
pub fn to_norm_point(point: Point, pixels: Size) -> (f64, f64) {
    (point.x / pixels.width, 1.0 - point.y / pixels.height)
}

/// Bounding box the preview is fitted into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preview {
    pub max_width: f64,
    pub max_height: f64,
}

impl Default for Preview {
    fn default() -> Self {
        Self {
            max_width: 800.0,
            max_height: 600.0,
        }
    }
}

impl Preview {
    /// Pixel size keeping the canvas aspect ratio. Landscape canvases fill
    /// the width, portrait and square ones the height.
    pub fn pixel_size(&self, canvas: &Canvas) -> Size {
        let aspect = canvas.aspect_ratio();
        if aspect > 1.0 {
            Size::new(self.max_width, self.max_width / aspect)
        } else {
            Size::new(self.max_height * aspect, self.max_height)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_half_square() {
        let rect = NormRect {
            center_x: 0.5,
            center_y: 0.5,
            width: 0.5,
            height: 0.5,
        };
        let px = to_pixel_rect(&rect, Size::new(800.0, 600.0));
        assert_eq!(px, Rect::new(200.0, 150.0, 600.0, 450.0));
    }

    #[test]
    fn y_up_rect_lands_at_top() {
        // Upper-left quarter in y-up space is the upper-left quarter on screen.
        let rect = NormRect::from_edges(0.0, 0.5, 0.5, 1.0);
        let px = to_pixel_rect(&rect, Size::new(800.0, 600.0));
        assert_eq!(px, Rect::new(0.0, 0.0, 400.0, 300.0));
    }

    #[test]
    fn norm_point_inverts_flip() {
        let (x, y) = to_norm_point(Point::new(200.0, 150.0), Size::new(800.0, 600.0));
        assert_eq!((x, y), (0.25, 0.75));
    }

    #[test]
    fn preview_keeps_aspect_ratio() {
        let preview = Preview::default();
        let wide = preview.pixel_size(&Canvas::new(1920, 1080).unwrap());
        assert_eq!(wide.width, 800.0);
        assert!((wide.height - 450.0).abs() < 1e-9);

        let tall = preview.pixel_size(&Canvas::new(1080, 1920).unwrap());
        assert_eq!(tall.height, 600.0);
        assert!((tall.width - 337.5).abs() < 1e-9);
    }
}
