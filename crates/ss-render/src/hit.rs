//! Hit testing: pixel → screen element, pixel → grid cell.

use crate::surface::DisplayList;
use crate::transform::to_pixel_rect;
use kurbo::{Point, Size};
use ss_core::{CellCoord, ElementId, Grid};

/// Topmost screen element under `point`, or `None` over grid or background.
pub fn element_at(list: &DisplayList, point: Point) -> Option<ElementId> {
    // Last painted = topmost
    list.screens()
        .rev()
        .find(|e| e.rect.contains(point))
        .map(|e| e.id)
}

/// Grid cell under `point` on a preview of `pixels` size. Points in the
/// margins or gutters hit nothing.
pub fn cell_at(grid: &Grid, pixels: Size, point: Point) -> Option<CellCoord> {
    grid.generate_cells()
        .into_iter()
        .find(|cell| to_pixel_rect(&cell.rect, pixels).contains(point))
        .map(|cell| cell.coord())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ss_core::{Canvas, Margin, Screen, ScreenId};
    use ss_editor::RenderSurface;

    fn grid(margin: Margin) -> Grid {
        Grid::new(Canvas::new(800, 600).unwrap(), margin, 2, 2).unwrap()
    }

    #[test]
    fn cell_at_maps_pixels_to_cells() {
        let g = grid(Margin::default());
        let size = Size::new(800.0, 600.0);
        assert_eq!(
            cell_at(&g, size, Point::new(100.0, 100.0)),
            Some(CellCoord::new(0, 0))
        );
        assert_eq!(
            cell_at(&g, size, Point::new(700.0, 500.0)),
            Some(CellCoord::new(1, 1))
        );
    }

    #[test]
    fn cell_at_misses_margins_and_gutters() {
        let g = grid(Margin::new(20, 20, 20, 20, 40));
        let size = Size::new(800.0, 600.0);
        assert_eq!(cell_at(&g, size, Point::new(5.0, 300.0)), None);
        assert_eq!(cell_at(&g, size, Point::new(400.0, 100.0)), None);
        assert!(cell_at(&g, size, Point::new(100.0, 100.0)).is_some());
    }

    #[test]
    fn element_at_prefers_topmost_screen() {
        let g = grid(Margin::default());
        let mut list = DisplayList::default();
        list.draw_grid(&g).unwrap();

        let whole = Screen::from_coords(
            ScreenId(0),
            &g,
            CellCoord::new(0, 0),
            CellCoord::new(1, 1),
            1.0,
        )
        .unwrap();
        let corner = Screen::from_coords(
            ScreenId(1),
            &g,
            CellCoord::new(1, 1),
            CellCoord::new(1, 1),
            1.0,
        )
        .unwrap();
        let below = list.draw_screen(&g, &whole.values(&g)).unwrap();
        let above = list.draw_screen(&g, &corner.values(&g)).unwrap();

        assert_eq!(element_at(&list, Point::new(700.0, 500.0)), Some(above));
        assert_eq!(element_at(&list, Point::new(100.0, 100.0)), Some(below));
    }

    #[test]
    fn element_at_ignores_grid_blocks() {
        let g = grid(Margin::default());
        let mut list = DisplayList::default();
        list.draw_grid(&g).unwrap();
        assert_eq!(element_at(&list, Point::new(100.0, 100.0)), None);
    }
}
