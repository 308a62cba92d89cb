//! JSON report printed after a script run.

use serde::Serialize;
use ss_core::ScreenValues;
use ss_editor::Controller;
use ss_engine::{NodeGraphEngine, ToolKind};
use ss_render::DisplayList;

#[derive(Debug, Serialize)]
pub struct Summary {
    pub canvas: [u32; 2],
    pub grid: GridSummary,
    pub screens: Vec<ScreenSummary>,
    pub engine: EngineSummary,
    pub errors: Vec<LineError>,
}

#[derive(Debug, Serialize)]
pub struct GridSummary {
    pub cols: u32,
    pub rows: u32,
    /// `[top, left, bottom, right]`
    pub margins: [u32; 4],
    pub gutter: u32,
    pub linked: bool,
}

#[derive(Debug, Serialize)]
pub struct ScreenSummary {
    pub id: u32,
    pub start: [u32; 2],
    pub end: [u32; 2],
    pub element: u64,
    pub layer: Option<u32>,
    pub values: ScreenValues,
}

#[derive(Debug, Serialize)]
pub struct EngineSummary {
    pub open: bool,
    pub tools: usize,
    pub merges: usize,
    pub masks: usize,
    pub media_ins: usize,
}

/// A script line the controller rejected.
#[derive(Debug, Clone, Serialize)]
pub struct LineError {
    pub line: usize,
    pub message: String,
}

impl Summary {
    pub fn collect(ctl: &Controller<NodeGraphEngine, DisplayList>, errors: Vec<LineError>) -> Self {
        let grid = ctl.grid();
        let margin = grid.margin();
        let engine = ctl.engine();

        let screens = ctl
            .screens()
            .iter()
            .map(|record| {
                let screen = &record.screen;
                ScreenSummary {
                    id: screen.id().0,
                    start: [screen.start().col, screen.start().row],
                    end: [screen.end().col, screen.end().row],
                    element: record.element.0,
                    layer: engine.layer(&record.handles),
                    values: screen.values(grid),
                }
            })
            .collect();

        let count = |kind| engine.composition().map_or(0, |c| c.count(kind));
        let engine = EngineSummary {
            open: engine.session().is_open(),
            tools: engine.composition().map_or(0, |c| c.tool_count()),
            merges: count(ToolKind::Merge),
            masks: count(ToolKind::RectangleMask),
            media_ins: count(ToolKind::MediaIn),
        };

        Self {
            canvas: [grid.canvas().width(), grid.canvas().height()],
            grid: GridSummary {
                cols: grid.cols(),
                rows: grid.rows(),
                margins: margin.edges(),
                gutter: margin.gutter(),
                linked: margin.is_linked(),
            },
            screens,
            engine,
            errors,
        }
    }
}
