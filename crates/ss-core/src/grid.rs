//! Grid partition of the canvas interior.
//!
//! The interior is the canvas minus its margins. It is split into
//! `cols × rows` equal cells separated by the gutter; the gutter sits only
//! between cells, never around the grid's outer edge. Cells are not stored:
//! every call derives them from the current canvas, margin and counts.
//!
//! Pixel space runs y-down from the canvas' top-left corner. Cell rectangles
//! are reported in the normalized unit square, y-up from the bottom-left,
//! which is what the compositing engine speaks. Row 0 is the top row.

use crate::canvas::Canvas;
use crate::error::{Result, SplitError};
use crate::margin::Margin;
use serde::{Deserialize, Serialize};

/// Column/row index of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellCoord {
    pub col: u32,
    pub row: u32,
}

impl CellCoord {
    pub const fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }
}

/// Axis-aligned rectangle in normalized unit-square space (y-up).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormRect {
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
}

impl NormRect {
    pub fn from_edges(left: f64, bottom: f64, right: f64, top: f64) -> Self {
        Self {
            center_x: (left + right) / 2.0,
            center_y: (bottom + top) / 2.0,
            width: right - left,
            height: top - bottom,
        }
    }

    pub fn left(&self) -> f64 {
        self.center_x - self.width / 2.0
    }

    pub fn right(&self) -> f64 {
        self.center_x + self.width / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.center_y - self.height / 2.0
    }

    pub fn top(&self) -> f64 {
        self.center_y + self.height / 2.0
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Area shared with `other`; 0.0 when they only touch or are apart.
    pub fn overlap_area(&self, other: &NormRect) -> f64 {
        let w = self.right().min(other.right()) - self.left().max(other.left());
        let h = self.top().min(other.top()) - self.bottom().max(other.bottom());
        if w > 0.0 && h > 0.0 { w * h } else { 0.0 }
    }
}

/// One derived cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub row: u32,
    pub col: u32,
    pub rect: NormRect,
}

impl GridCell {
    pub fn coord(&self) -> CellCoord {
        CellCoord::new(self.col, self.row)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    canvas: Canvas,
    margin: Margin,
    cols: u32,
    rows: u32,
}

impl Grid {
    pub fn new(canvas: Canvas, margin: Margin, cols: u32, rows: u32) -> Result<Self> {
        let mut grid = Self {
            canvas,
            margin,
            cols: 1,
            rows: 1,
        };
        grid.set_cols(cols)?;
        grid.set_rows(rows)?;
        Ok(grid)
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn margin(&self) -> &Margin {
        &self.margin
    }

    pub fn margin_mut(&mut self) -> &mut Margin {
        &mut self.margin
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn set_cols(&mut self, cols: u32) -> Result<()> {
        if cols < 1 {
            return Err(SplitError::invalid("cols", cols));
        }
        self.cols = cols;
        Ok(())
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn set_rows(&mut self, rows: u32) -> Result<()> {
        if rows < 1 {
            return Err(SplitError::invalid("rows", rows));
        }
        self.rows = rows;
        Ok(())
    }

    // ─── Pixel measures ─────────────────────────────────────────────────

    /// Canvas width minus left and right insets. Negative when the margins
    /// are wider than the canvas; the grid does not clamp.
    pub fn usable_width(&self) -> f64 {
        f64::from(self.canvas.width())
            - f64::from(self.margin.left())
            - f64::from(self.margin.right())
    }

    pub fn usable_height(&self) -> f64 {
        f64::from(self.canvas.height())
            - f64::from(self.margin.top())
            - f64::from(self.margin.bottom())
    }

    pub fn cell_width_px(&self) -> f64 {
        let gutter = f64::from(self.margin.gutter());
        let cols = f64::from(self.cols);
        self.usable_width() / cols - gutter * (cols - 1.0) / cols
    }

    pub fn cell_height_px(&self) -> f64 {
        let gutter = f64::from(self.margin.gutter());
        let rows = f64::from(self.rows);
        self.usable_height() / rows - gutter * (rows - 1.0) / rows
    }

    /// Left edge of column `col`, in pixels from the canvas' left.
    fn col_left_px(&self, col: u32) -> f64 {
        f64::from(self.margin.left())
            + f64::from(col) * (self.cell_width_px() + f64::from(self.margin.gutter()))
    }

    /// Top edge of row `row`, in pixels from the canvas' top.
    fn row_top_px(&self, row: u32) -> f64 {
        f64::from(self.margin.top())
            + f64::from(row) * (self.cell_height_px() + f64::from(self.margin.gutter()))
    }

    // ─── Cells ──────────────────────────────────────────────────────────

    pub fn contains(&self, coord: CellCoord) -> bool {
        coord.col < self.cols && coord.row < self.rows
    }

    /// Pull `coord` back inside the grid.
    pub fn clamp(&self, coord: CellCoord) -> CellCoord {
        CellCoord::new(coord.col.min(self.cols - 1), coord.row.min(self.rows - 1))
    }

    /// Normalized rectangle spanned by the cells between two corner cells,
    /// inclusive, in either order.
    pub fn span(&self, a: CellCoord, b: CellCoord) -> NormRect {
        let (width, height) = (
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        );
        let (min_col, max_col) = (a.col.min(b.col), a.col.max(b.col));
        let (min_row, max_row) = (a.row.min(b.row), a.row.max(b.row));

        let left_px = self.col_left_px(min_col);
        let right_px = self.col_left_px(max_col) + self.cell_width_px();
        let top_px = self.row_top_px(min_row);
        let bottom_px = self.row_top_px(max_row) + self.cell_height_px();

        NormRect::from_edges(
            left_px / width,
            1.0 - bottom_px / height,
            right_px / width,
            1.0 - top_px / height,
        )
    }

    pub fn cell(&self, coord: CellCoord) -> Option<GridCell> {
        self.contains(coord).then(|| GridCell {
            row: coord.row,
            col: coord.col,
            rect: self.span(coord, coord),
        })
    }

    /// All `rows × cols` cells, row-major from the top-left cell.
    pub fn generate_cells(&self) -> Vec<GridCell> {
        (0..self.rows)
            .flat_map(|row| (0..self.cols).map(move |col| CellCoord::new(col, row)))
            .filter_map(|coord| self.cell(coord))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(cols: u32, rows: u32, margin: Margin) -> Grid {
        Grid::new(Canvas::new(800, 600).unwrap(), margin, cols, rows).unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn two_columns_no_margin() {
        let cells = grid(2, 1, Margin::default()).generate_cells();
        assert_eq!(cells.len(), 2);
        for cell in &cells {
            assert!(close(cell.rect.width, 0.5));
            assert!(close(cell.rect.height, 1.0));
            assert!(close(cell.rect.center_y, 0.5));
        }
        assert!(close(cells[0].rect.center_x, 0.25));
        assert!(close(cells[1].rect.center_x, 0.75));
    }

    #[test]
    fn cell_width_distributes_gutter_between_cells() {
        // usable 800 - 2*50 = 700; 3 cols, 2 gutters of 20 → (700 - 40) / 3 = 220
        let g = grid(3, 1, Margin::new(0, 50, 0, 50, 20));
        assert!(close(g.cell_width_px(), 220.0));
        let cells = g.generate_cells();
        assert!(close(cells[0].rect.left(), 50.0 / 800.0));
        assert!(close(cells[1].rect.left(), 290.0 / 800.0));
        assert!(close(cells[2].rect.right(), 750.0 / 800.0));
    }

    #[test]
    fn row_zero_is_the_top_row() {
        let g = grid(1, 2, Margin::default());
        let top = g.cell(CellCoord::new(0, 0)).unwrap();
        let bottom = g.cell(CellCoord::new(0, 1)).unwrap();
        assert!(close(top.rect.center_y, 0.75));
        assert!(close(bottom.rect.center_y, 0.25));
    }

    #[test]
    fn span_covers_corner_cells_in_any_order() {
        let g = grid(4, 4, Margin::new(10, 10, 10, 10, 10));
        let forward = g.span(CellCoord::new(1, 1), CellCoord::new(2, 3));
        let backward = g.span(CellCoord::new(2, 3), CellCoord::new(1, 1));
        assert_eq!(forward, backward);

        let first = g.cell(CellCoord::new(1, 1)).unwrap().rect;
        let last = g.cell(CellCoord::new(2, 3)).unwrap().rect;
        assert!(close(forward.left(), first.left()));
        assert!(close(forward.top(), first.top()));
        assert!(close(forward.right(), last.right()));
        assert!(close(forward.bottom(), last.bottom()));
    }

    #[test]
    fn rejects_zero_cols_and_rows() {
        let mut g = grid(2, 2, Margin::default());
        assert_eq!(
            g.set_cols(0),
            Err(SplitError::InvalidDimension {
                name: "cols",
                value: 0
            })
        );
        assert!(g.set_rows(0).is_err());
        assert_eq!((g.cols(), g.rows()), (2, 2));
        assert!(Grid::new(Canvas::new(10, 10).unwrap(), Margin::default(), 0, 1).is_err());
    }

    #[test]
    fn cells_follow_margin_changes() {
        let mut g = grid(1, 1, Margin::default());
        assert!(close(g.generate_cells()[0].rect.width, 1.0));
        g.margin_mut().set_left(400);
        assert!(close(g.generate_cells()[0].rect.width, 0.5));
        g.canvas_mut().set_width(1600).unwrap();
        assert!(close(g.generate_cells()[0].rect.width, 0.75));
    }

    #[test]
    fn clamp_pulls_coords_inside() {
        let g = grid(2, 3, Margin::default());
        assert_eq!(g.clamp(CellCoord::new(5, 1)), CellCoord::new(1, 1));
        assert_eq!(g.clamp(CellCoord::new(0, 9)), CellCoord::new(0, 2));
        assert!(!g.contains(CellCoord::new(2, 0)));
    }
}
