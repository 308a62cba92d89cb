//! Screens: user-placed rectangles snapped to grid cells.

use crate::error::{Result, SplitError};
use crate::grid::{CellCoord, Grid, NormRect};
use crate::id::ScreenId;
use serde::{Deserialize, Serialize};

/// Merge scale handed to the engine for new screens when nothing else is configured.
pub const DEFAULT_SCREEN_SIZE: f64 = 1.0;

/// Normalized geometry of one screen, in the engine's unit-square space.
///
/// `size` is the engine's own scale input. This crate never derives it from
/// `width`/`height`; it is carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenValues {
    pub width: f64,
    pub height: f64,
    pub center: (f64, f64),
    pub size: f64,
}

impl ScreenValues {
    pub fn rect(&self) -> NormRect {
        NormRect {
            center_x: self.center.0,
            center_y: self.center.1,
            width: self.width,
            height: self.height,
        }
    }
}

/// A screen anchored to two grid-cell corners.
///
/// Screens are immutable once created; resizing is a delete followed by an
/// add. Geometry is derived from the grid on demand, so canvas, margin and
/// grid edits move every screen without touching it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    id: ScreenId,
    start: CellCoord,
    end: CellCoord,
    size: f64,
}

impl Screen {
    /// Both corners must name cells of the current grid.
    pub fn from_coords(
        id: ScreenId,
        grid: &Grid,
        start: CellCoord,
        end: CellCoord,
        size: f64,
    ) -> Result<Self> {
        for coord in [start, end] {
            if coord.col >= grid.cols() {
                return Err(SplitError::invalid("col", coord.col));
            }
            if coord.row >= grid.rows() {
                return Err(SplitError::invalid("row", coord.row));
            }
        }
        Ok(Self {
            id,
            start,
            end,
            size,
        })
    }

    pub fn id(&self) -> ScreenId {
        self.id
    }

    pub fn start(&self) -> CellCoord {
        self.start
    }

    pub fn end(&self) -> CellCoord {
        self.end
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    /// Current geometry against `grid`. Corners left outside a grid that has
    /// since shrunk are clamped to its last column/row.
    pub fn values(&self, grid: &Grid) -> ScreenValues {
        let rect = grid.span(grid.clamp(self.start), grid.clamp(self.end));
        ScreenValues {
            width: rect.width,
            height: rect.height,
            center: (rect.center_x, rect.center_y),
            size: self.size,
        }
    }

    /// Mirror across the grid's vertical axis.
    pub fn flipped_horizontally(&self, grid: &Grid) -> Self {
        let mirror = |c: CellCoord| {
            let c = grid.clamp(c);
            CellCoord::new(grid.cols() - 1 - c.col, c.row)
        };
        Self {
            start: mirror(self.start),
            end: mirror(self.end),
            ..self.clone()
        }
    }

    /// Mirror across the grid's horizontal axis.
    pub fn flipped_vertically(&self, grid: &Grid) -> Self {
        let mirror = |c: CellCoord| {
            let c = grid.clamp(c);
            CellCoord::new(c.col, grid.rows() - 1 - c.row)
        };
        Self {
            start: mirror(self.start),
            end: mirror(self.end),
            ..self.clone()
        }
    }
}
