//! Capability sets the controller needs from its two collaborators.
//!
//! Both are called synchronously and only by the [`Controller`]; a call
//! either completes or returns an error before the controller moves on.
//!
//! [`Controller`]: crate::controller::Controller

use ss_core::{ElementId, Grid, Result, ScreenValues};
use std::fmt::Debug;

/// The compositing engine that mirrors every screen as live nodes.
pub trait EngineSync {
    /// Opaque bundle of engine nodes created for one screen.
    type Handles: Clone + Debug;

    /// One-time setup of the background the screens are composited over.
    fn add_canvas(&mut self, width: u32, height: u32) -> Result<()>;

    /// Full-state push after canvas, margin or grid changes. `handles` and
    /// `values` are parallel, in screen order. Implementations skip work
    /// when the resolution is unchanged and there are no screens.
    fn refresh_global(
        &mut self,
        resolution: (u32, u32),
        handles: &[&Self::Handles],
        values: &[ScreenValues],
    ) -> Result<()>;

    fn add_screen(&mut self, values: &ScreenValues) -> Result<Self::Handles>;

    fn delete_screen(&mut self, handles: &Self::Handles) -> Result<()>;

    /// Remove every screen node. The engine knows its own bookkeeping.
    fn delete_all_screens(&mut self) -> Result<()>;
}

/// The interactive preview the operator draws on.
///
/// Element ids are only valid until the next [`RenderSurface::refresh`].
pub trait RenderSurface {
    fn draw_grid(&mut self, grid: &Grid) -> Result<()>;

    fn draw_screen(&mut self, grid: &Grid, values: &ScreenValues) -> Result<ElementId>;

    fn undraw_screens(&mut self, ids: &[ElementId]) -> Result<()>;

    /// Redraw the grid and, if given, the screens. Returns the screens' new
    /// element ids in input order, or `None` when no screens were passed.
    fn refresh(
        &mut self,
        grid: &Grid,
        screens: Option<&[ScreenValues]>,
    ) -> Result<Option<Vec<ElementId>>>;
}
