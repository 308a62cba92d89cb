//! Retained-mode preview surface.
//!
//! Keeps the drawn shapes as a paint-ordered list of elements: grid blocks
//! first, screens on top. Every shape gets a fresh [`ElementId`] when drawn,
//! so a redraw invalidates all ids handed out before it.

use crate::transform::{Preview, to_pixel_rect};
use kurbo::{Rect, Size};
use ss_core::{CellCoord, ElementId, Grid, Result, ScreenValues};
use ss_editor::RenderSurface;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElementKind {
    GridBlock(CellCoord),
    Screen,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    pub id: ElementId,
    pub kind: ElementKind,
    pub rect: Rect,
}

#[derive(Debug, Clone)]
pub struct DisplayList {
    preview: Preview,
    size: Size,
    elements: Vec<Element>,
    last_id: u64,
}

impl DisplayList {
    pub fn new(preview: Preview) -> Self {
        Self {
            preview,
            size: Size::new(preview.max_width, preview.max_height),
            elements: Vec::new(),
            last_id: 0,
        }
    }

    /// Pixel size of the preview as of the last draw.
    pub fn size(&self) -> Size {
        self.size
    }

    /// All elements, bottom-most first.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn screens(&self) -> impl DoubleEndedIterator<Item = &Element> {
        self.elements
            .iter()
            .filter(|e| e.kind == ElementKind::Screen)
    }

    pub fn grid_blocks(&self) -> impl Iterator<Item = &Element> {
        self.elements
            .iter()
            .filter(|e| matches!(e.kind, ElementKind::GridBlock(_)))
    }

    fn issue(&mut self) -> ElementId {
        self.last_id += 1;
        ElementId(self.last_id)
    }

    fn fit(&mut self, grid: &Grid) {
        self.size = self.preview.pixel_size(grid.canvas());
    }

    fn push_screen(&mut self, values: &ScreenValues) -> ElementId {
        let id = self.issue();
        let rect = to_pixel_rect(&values.rect(), self.size);
        log::trace!("DRAW screen {id} at {rect:?}");
        self.elements.push(Element {
            id,
            kind: ElementKind::Screen,
            rect,
        });
        id
    }
}

impl Default for DisplayList {
    fn default() -> Self {
        Self::new(Preview::default())
    }
}

impl RenderSurface for DisplayList {
    fn draw_grid(&mut self, grid: &Grid) -> Result<()> {
        self.fit(grid);
        self.elements
            .retain(|e| !matches!(e.kind, ElementKind::GridBlock(_)));

        let cells = grid.generate_cells();
        let mut blocks = Vec::with_capacity(cells.len());
        for cell in cells {
            let id = self.issue();
            blocks.push(Element {
                id,
                kind: ElementKind::GridBlock(cell.coord()),
                rect: to_pixel_rect(&cell.rect, self.size),
            });
        }
        log::trace!("DRAW grid {}x{} ({} blocks)", grid.cols(), grid.rows(), blocks.len());

        // Grid blocks stay underneath any screens already drawn.
        blocks.append(&mut self.elements);
        self.elements = blocks;
        Ok(())
    }

    fn draw_screen(&mut self, grid: &Grid, values: &ScreenValues) -> Result<ElementId> {
        self.fit(grid);
        Ok(self.push_screen(values))
    }

    fn undraw_screens(&mut self, ids: &[ElementId]) -> Result<()> {
        self.elements
            .retain(|e| !(e.kind == ElementKind::Screen && ids.contains(&e.id)));
        Ok(())
    }

    fn refresh(
        &mut self,
        grid: &Grid,
        screens: Option<&[ScreenValues]>,
    ) -> Result<Option<Vec<ElementId>>> {
        self.elements.clear();
        self.draw_grid(grid)?;

        Ok(screens.map(|screens| screens.iter().map(|v| self.push_screen(v)).collect()))
    }
}
