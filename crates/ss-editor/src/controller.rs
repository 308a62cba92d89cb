//! The controller: single writer of the geometry and the only caller of the
//! two adapters.
//!
//! Every accepted mutation is propagated in a fixed order:
//!
//! 1. **Engine**: one full-state push of the canvas resolution and every
//!    screen's recomputed geometry. Margin, grid and canvas edits can move
//!    all screens at once, so the push is never incremental.
//! 2. **Surface**: full redraw of the grid and the screens. The surface hands
//!    back fresh element ids, which are zipped onto the screen records in
//!    order.
//!
//! A setting whose new value equals the current one is a complete no-op:
//! neither adapter is called.

use crate::adapter::{EngineSync, RenderSurface};
use crate::commands::{Command, Outcome, Setting};
use log::{debug, trace, warn};
use ss_core::{
    CellCoord, DEFAULT_SCREEN_SIZE, ElementId, GeometryConfig, Grid, Result, Screen, ScreenId,
    ScreenValues, SplitError, find_first_missing,
};

/// A live screen together with what it produced in each adapter.
#[derive(Debug, Clone)]
pub struct ScreenRecord<H> {
    pub screen: Screen,
    /// Engine nodes mirroring this screen.
    pub handles: H,
    /// Element the screen is drawn as since the last refresh.
    pub element: ElementId,
}

pub struct Controller<E: EngineSync, R: RenderSurface> {
    grid: Grid,
    engine: E,
    surface: R,
    screens: Vec<ScreenRecord<E::Handles>>,
    screen_size: f64,
}

impl<E: EngineSync, R: RenderSurface> Controller<E, R> {
    /// Take ownership of the geometry, set up the engine's canvas and draw
    /// the empty grid.
    pub fn new(grid: Grid, mut engine: E, mut surface: R) -> Result<Self> {
        let (width, height) = grid.canvas().resolution();
        engine.add_canvas(width, height)?;
        surface.draw_grid(&grid)?;

        Ok(Self {
            grid,
            engine,
            surface,
            screens: Vec::new(),
            screen_size: DEFAULT_SCREEN_SIZE,
        })
    }

    pub fn from_config(config: &GeometryConfig, engine: E, surface: R) -> Result<Self> {
        let grid = config.build_grid()?;
        Ok(Self::new(grid, engine, surface)?.with_screen_size(config.screen_size))
    }

    /// Merge scale forwarded for screens added from now on.
    pub fn with_screen_size(mut self, size: f64) -> Self {
        self.screen_size = size;
        self
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn screens(&self) -> &[ScreenRecord<E::Handles>] {
        &self.screens
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }

    /// Geometry of every live screen, in record order.
    pub fn screen_values(&self) -> Vec<ScreenValues> {
        self.screens
            .iter()
            .map(|r| r.screen.values(&self.grid))
            .collect()
    }

    /// Element a screen is currently drawn as.
    pub fn element_of(&self, id: ScreenId) -> Option<ElementId> {
        self.screens
            .iter()
            .find(|r| r.screen.id() == id)
            .map(|r| r.element)
    }

    /// Hand back the geometry and both adapters, e.g. to close the engine session.
    pub fn into_parts(self) -> (Grid, E, R) {
        (self.grid, self.engine, self.surface)
    }

    // ─── Dispatch ────────────────────────────────────────────────────────

    pub fn do_command(&mut self, command: Command) -> Result<Outcome> {
        debug!("command {command:?}");
        match command {
            Command::Set(setting, value) => self.change_setting(setting, value),
            Command::LinkMargins => self.link_margins(),
            Command::UnlinkMargins => {
                self.grid.margin_mut().unlink();
                Ok(Outcome::Unchanged)
            }
            Command::AddScreen { start, end } => self.add_screen(start, end),
            Command::DeleteScreen(element) => self.delete_screen(element),
            Command::DeleteAllScreens => self.delete_all_screens(),
            Command::FlipH => self.flip(Screen::flipped_horizontally),
            Command::FlipV => self.flip(Screen::flipped_vertically),
        }
    }

    /// Current value of a setting. `Margin` has one only while all four
    /// edges agree.
    pub fn setting(&self, setting: Setting) -> Option<u32> {
        let canvas = self.grid.canvas();
        let margin = self.grid.margin();
        match setting {
            Setting::Width => Some(canvas.width()),
            Setting::Height => Some(canvas.height()),
            Setting::Margin => margin.all(),
            Setting::Top => Some(margin.top()),
            Setting::Left => Some(margin.left()),
            Setting::Bottom => Some(margin.bottom()),
            Setting::Right => Some(margin.right()),
            Setting::Gutter => Some(margin.gutter()),
            Setting::Cols => Some(self.grid.cols()),
            Setting::Rows => Some(self.grid.rows()),
        }
    }

    fn change_setting(&mut self, setting: Setting, value: u32) -> Result<Outcome> {
        if self.setting(setting) == Some(value) {
            trace!("{setting} already {value}");
            return Ok(Outcome::Unchanged);
        }

        // Setters run before any adapter call, so a rejected value leaves
        // both adapters untouched.
        match setting {
            Setting::Width => self.grid.canvas_mut().set_width(value)?,
            Setting::Height => self.grid.canvas_mut().set_height(value)?,
            Setting::Margin => self.grid.margin_mut().set_all(value),
            Setting::Top => self.grid.margin_mut().set_top(value),
            Setting::Left => self.grid.margin_mut().set_left(value),
            Setting::Bottom => self.grid.margin_mut().set_bottom(value),
            Setting::Right => self.grid.margin_mut().set_right(value),
            Setting::Gutter => self.grid.margin_mut().set_gutter(value),
            Setting::Cols => self.grid.set_cols(value)?,
            Setting::Rows => self.grid.set_rows(value)?,
        }

        self.sync()?;
        Ok(Outcome::Synced)
    }

    fn link_margins(&mut self) -> Result<Outcome> {
        let before = self.grid.margin().edges();
        self.grid.margin_mut().link();
        if self.grid.margin().edges() == before {
            return Ok(Outcome::Unchanged);
        }
        self.sync()?;
        Ok(Outcome::Synced)
    }

    // ─── Screens ─────────────────────────────────────────────────────────

    fn add_screen(&mut self, start: CellCoord, end: CellCoord) -> Result<Outcome> {
        let used: Vec<u32> = self.screens.iter().map(|r| r.screen.id().0).collect();
        let id = ScreenId(find_first_missing(&used));

        let screen = Screen::from_coords(id, &self.grid, start, end, self.screen_size)?;
        let values = screen.values(&self.grid);

        let handles = self.engine.add_screen(&values)?;
        let element = match self.surface.draw_screen(&self.grid, &values) {
            Ok(element) => element,
            Err(err) => {
                warn!("drawing {id} failed ({err}); removing its engine nodes");
                if let Err(undo) = self.engine.delete_screen(&handles) {
                    warn!("could not remove engine nodes for {id}: {undo}");
                }
                return Err(err);
            }
        };

        debug!("added {id} as element {element}");
        self.screens.push(ScreenRecord {
            screen,
            handles,
            element,
        });
        Ok(Outcome::Added { id, element })
    }

    fn delete_screen(&mut self, element: ElementId) -> Result<Outcome> {
        let Some(pos) = self.screens.iter().position(|r| r.element == element) else {
            warn!("no screen is drawn as element {element}");
            return Err(SplitError::NotFound(element));
        };

        self.engine.delete_screen(&self.screens[pos].handles)?;
        let record = self.screens.remove(pos);
        self.surface.undraw_screens(&[record.element])?;

        // Remaining screens keep their ids; the freed one is reused by the next add.
        Ok(Outcome::Deleted(record.screen.id()))
    }

    fn delete_all_screens(&mut self) -> Result<Outcome> {
        if self.screens.is_empty() {
            return Ok(Outcome::Unchanged);
        }

        let elements: Vec<ElementId> = self.screens.iter().map(|r| r.element).collect();
        self.surface.undraw_screens(&elements)?;
        self.engine.delete_all_screens()?;

        let count = self.screens.len();
        self.screens.clear();
        Ok(Outcome::Cleared(count))
    }

    fn flip(&mut self, mirror: fn(&Screen, &Grid) -> Screen) -> Result<Outcome> {
        if self.screens.is_empty() {
            return Ok(Outcome::Unchanged);
        }
        for record in &mut self.screens {
            record.screen = mirror(&record.screen, &self.grid);
        }
        self.sync()?;
        Ok(Outcome::Synced)
    }

    // ─── Refresh ─────────────────────────────────────────────────────────

    fn sync(&mut self) -> Result<()> {
        self.refresh_engine()?;
        self.refresh_surface()
    }

    fn refresh_engine(&mut self) -> Result<()> {
        let values = self.screen_values();
        let handles: Vec<&E::Handles> = self.screens.iter().map(|r| &r.handles).collect();
        trace!("pushing {} screens to the engine", values.len());
        self.engine
            .refresh_global(self.grid.canvas().resolution(), &handles, &values)
    }

    fn refresh_surface(&mut self) -> Result<()> {
        let values = self.screen_values();
        let screens = (!values.is_empty()).then_some(values.as_slice());
        let elements = self.surface.refresh(&self.grid, screens)?;
        self.update_elements(elements)
    }

    /// Re-attach the element ids a redraw produced.
    fn update_elements(&mut self, elements: Option<Vec<ElementId>>) -> Result<()> {
        let elements = elements.unwrap_or_default();
        if elements.len() != self.screens.len() {
            return Err(SplitError::Render(format!(
                "redraw returned {} elements for {} screens",
                elements.len(),
                self.screens.len()
            )));
        }
        for (record, element) in self.screens.iter_mut().zip(elements) {
            record.element = element;
        }
        Ok(())
    }
}
