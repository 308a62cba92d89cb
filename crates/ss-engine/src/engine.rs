//! [`EngineSync`] over an in-process node graph.
//!
//! The composition is a single backbone of merges on top of the canvas
//! background:
//!
//! ```text
//! Background ─▶ Merge1 ─▶ Merge2 ─▶ … ─▶ MediaOut
//!                 ▲  ▲
//!    RectangleMask  MediaIn
//! ```
//!
//! Each screen owns one merge with its mask (`EffectMask`) and media-in
//! (`Foreground`). The media-out always reads the last merge, or the
//! background when there are no screens.

use crate::composition::{Composition, InputValue, Slot, ToolKind};
use crate::session::EngineSession;
use petgraph::graph::NodeIndex;
use ss_core::{Result, ScreenValues, SplitError, find_first_missing};
use ss_editor::EngineSync;

const CANVAS_NAME: &str = "SSCanvas";

/// Engine nodes created for one screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenHandles {
    pub merge: NodeIndex,
    pub mask: NodeIndex,
    pub media_in: NodeIndex,
}

#[derive(Debug)]
pub struct NodeGraphEngine {
    session: EngineSession,
    canvas: Option<NodeIndex>,
    media_out: Option<NodeIndex>,
    /// Backbone order, bottom-most merge first.
    screens: Vec<ScreenHandles>,
}

impl NodeGraphEngine {
    pub fn new(session: EngineSession) -> Self {
        Self {
            session,
            canvas: None,
            media_out: None,
            screens: Vec::new(),
        }
    }

    pub fn session(&self) -> &EngineSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EngineSession {
        &mut self.session
    }

    pub fn composition(&self) -> Result<&Composition> {
        self.session.composition()
    }

    pub fn canvas(&self) -> Option<NodeIndex> {
        self.canvas
    }

    pub fn media_out(&self) -> Option<NodeIndex> {
        self.media_out
    }

    pub fn screens(&self) -> &[ScreenHandles] {
        &self.screens
    }

    /// Layer number of a live screen's media-in node.
    pub fn layer(&self, handles: &ScreenHandles) -> Option<u32> {
        layer_of(self.session.composition().ok()?, handles.media_in)
    }
}

impl EngineSync for NodeGraphEngine {
    type Handles = ScreenHandles;

    fn add_canvas(&mut self, width: u32, height: u32) -> Result<()> {
        let comp = self.session.composition_mut()?;
        if self.canvas.is_some() {
            return Err(SplitError::Engine("canvas already added".into()));
        }

        let canvas = comp.add_tool(ToolKind::Background);
        comp.rename(canvas, CANVAS_NAME)?;
        comp.set_input(canvas, "UseFrameFormatSettings", InputValue::Number(0.0))?;
        write_resolution(comp, canvas, (width, height))?;

        let media_out = comp.add_tool(ToolKind::MediaOut);
        comp.connect(canvas, media_out, Slot::Input)?;

        log::debug!("engine canvas {width}x{height}");
        self.canvas = Some(canvas);
        self.media_out = Some(media_out);
        Ok(())
    }

    fn refresh_global(
        &mut self,
        resolution: (u32, u32),
        handles: &[&ScreenHandles],
        values: &[ScreenValues],
    ) -> Result<()> {
        let comp = self.session.composition_mut()?;
        let canvas = self.canvas.ok_or_else(no_canvas)?;

        if resolution_of(comp, canvas) != Some(resolution) {
            write_resolution(comp, canvas, resolution)?;
        }

        if handles.is_empty() {
            return Ok(());
        }
        if handles.len() != values.len() {
            return Err(SplitError::Engine(format!(
                "{} screen handles but {} screen values",
                handles.len(),
                values.len()
            )));
        }

        for (screen, values) in handles.iter().zip(values) {
            write_screen(comp, screen, values)?;
        }
        Ok(())
    }

    fn add_screen(&mut self, values: &ScreenValues) -> Result<ScreenHandles> {
        let comp = self.session.composition_mut()?;
        let canvas = self.canvas.ok_or_else(no_canvas)?;
        let media_out = self.media_out.ok_or_else(no_canvas)?;

        let layers: Vec<u32> = self
            .screens
            .iter()
            .filter_map(|h| layer_of(comp, h.media_in))
            .collect();
        let layer = find_first_missing(&layers);

        let handles = ScreenHandles {
            merge: comp.add_tool(ToolKind::Merge),
            mask: comp.add_tool(ToolKind::RectangleMask),
            media_in: comp.add_tool(ToolKind::MediaIn),
        };
        comp.set_input(handles.media_in, "Layer", InputValue::Text(layer.to_string()))?;
        write_screen(comp, &handles, values)?;
        comp.connect(handles.mask, handles.merge, Slot::EffectMask)?;
        comp.connect(handles.media_in, handles.merge, Slot::Foreground)?;

        self.screens.push(handles);
        rechain(comp, canvas, media_out, &self.screens)?;
        log::debug!("engine screen on layer {layer}");
        Ok(handles)
    }

    fn delete_screen(&mut self, handles: &ScreenHandles) -> Result<()> {
        let comp = self.session.composition_mut()?;
        let canvas = self.canvas.ok_or_else(no_canvas)?;
        let media_out = self.media_out.ok_or_else(no_canvas)?;

        let pos = self
            .screens
            .iter()
            .position(|h| h == handles)
            .ok_or_else(|| SplitError::Engine(format!("unknown screen handles {handles:?}")))?;

        let removed = self.screens.remove(pos);
        for idx in [removed.merge, removed.mask, removed.media_in] {
            comp.remove_tool(idx);
        }
        rechain(comp, canvas, media_out, &self.screens)
    }

    fn delete_all_screens(&mut self) -> Result<()> {
        let comp = self.session.composition_mut()?;
        let canvas = self.canvas.ok_or_else(no_canvas)?;
        let media_out = self.media_out.ok_or_else(no_canvas)?;

        for screen in self.screens.drain(..) {
            for idx in [screen.merge, screen.mask, screen.media_in] {
                comp.remove_tool(idx);
            }
        }
        comp.connect(canvas, media_out, Slot::Input)
    }
}

// ─── Graph helpers ─────────────────────────────────────────────────────────

fn no_canvas() -> SplitError {
    SplitError::Engine("canvas not added".into())
}

fn write_resolution(comp: &mut Composition, canvas: NodeIndex, (w, h): (u32, u32)) -> Result<()> {
    comp.set_input(canvas, "Width", InputValue::Number(f64::from(w)))?;
    comp.set_input(canvas, "Height", InputValue::Number(f64::from(h)))
}

fn resolution_of(comp: &Composition, canvas: NodeIndex) -> Option<(u32, u32)> {
    let read = |key| match comp.input(canvas, key) {
        Some(InputValue::Number(n)) => Some(*n as u32),
        _ => None,
    };
    Some((read("Width")?, read("Height")?))
}

fn layer_of(comp: &Composition, media_in: NodeIndex) -> Option<u32> {
    match comp.input(media_in, "Layer") {
        Some(InputValue::Text(layer)) => layer.parse().ok(),
        _ => None,
    }
}

/// Merge gets position and scale; the mask gets the shape.
fn write_screen(comp: &mut Composition, handles: &ScreenHandles, values: &ScreenValues) -> Result<()> {
    let (x, y) = values.center;
    comp.set_input(handles.merge, "Center", InputValue::Point(x, y))?;
    comp.set_input(handles.merge, "Size", InputValue::Number(values.size))?;
    comp.set_input(handles.mask, "Width", InputValue::Number(values.width))?;
    comp.set_input(handles.mask, "Height", InputValue::Number(values.height))?;
    comp.set_input(handles.mask, "Center", InputValue::Point(x, y))
}

/// Re-link every merge's background to the one below it and point the
/// media-out at the top of the backbone.
fn rechain(
    comp: &mut Composition,
    canvas: NodeIndex,
    media_out: NodeIndex,
    screens: &[ScreenHandles],
) -> Result<()> {
    let mut below = canvas;
    for screen in screens {
        comp.connect(below, screen.merge, Slot::Background)?;
        below = screen.merge;
    }
    comp.connect(below, media_out, Slot::Input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn values(cx: f64, cy: f64) -> ScreenValues {
        ScreenValues {
            width: 0.5,
            height: 0.5,
            center: (cx, cy),
            size: 1.0,
        }
    }

    fn engine() -> NodeGraphEngine {
        let mut engine = NodeGraphEngine::new(EngineSession::open("test"));
        engine.add_canvas(1920, 1080).unwrap();
        engine
    }

    #[test]
    fn canvas_feeds_media_out() {
        let engine = engine();
        let comp = engine.composition().unwrap();
        let canvas = engine.canvas().unwrap();
        let out = engine.media_out().unwrap();
        assert_eq!(comp.tool(canvas).unwrap().name, "SSCanvas");
        assert_eq!(comp.source_of(out, Slot::Input), Some(canvas));
        assert_eq!(resolution_of(comp, canvas), Some((1920, 1080)));
    }

    #[test]
    fn second_canvas_is_rejected() {
        let mut engine = engine();
        assert!(matches!(
            engine.add_canvas(10, 10),
            Err(SplitError::Engine(_))
        ));
    }

    #[test]
    fn screens_stack_on_the_backbone() {
        let mut engine = engine();
        let a = engine.add_screen(&values(0.25, 0.75)).unwrap();
        let b = engine.add_screen(&values(0.75, 0.25)).unwrap();

        let comp = engine.composition().unwrap();
        assert_eq!(comp.source_of(a.merge, Slot::Background), engine.canvas());
        assert_eq!(comp.source_of(b.merge, Slot::Background), Some(a.merge));
        assert_eq!(comp.source_of(b.merge, Slot::EffectMask), Some(b.mask));
        assert_eq!(comp.source_of(b.merge, Slot::Foreground), Some(b.media_in));
        assert_eq!(
            comp.source_of(engine.media_out().unwrap(), Slot::Input),
            Some(b.merge)
        );
        assert_eq!(
            comp.input(b.mask, "Center"),
            Some(&InputValue::Point(0.75, 0.25))
        );
        assert_eq!(comp.input(b.merge, "Size"), Some(&InputValue::Number(1.0)));
    }

    #[test]
    fn layers_are_reused_after_delete() {
        let mut engine = engine();
        let a = engine.add_screen(&values(0.25, 0.25)).unwrap();
        let b = engine.add_screen(&values(0.5, 0.5)).unwrap();
        let c = engine.add_screen(&values(0.75, 0.75)).unwrap();
        assert_eq!(
            [a, b, c].map(|h| engine.layer(&h)),
            [Some(0), Some(1), Some(2)]
        );

        engine.delete_screen(&b).unwrap();
        let d = engine.add_screen(&values(0.5, 0.5)).unwrap();
        assert_eq!(engine.layer(&d), Some(1));
    }

    #[test]
    fn deleting_a_middle_screen_rechains() {
        let mut engine = engine();
        let a = engine.add_screen(&values(0.25, 0.25)).unwrap();
        let b = engine.add_screen(&values(0.5, 0.5)).unwrap();
        let c = engine.add_screen(&values(0.75, 0.75)).unwrap();

        engine.delete_screen(&b).unwrap();
        let comp = engine.composition().unwrap();
        assert!(!comp.contains(b.merge));
        assert!(!comp.contains(b.mask));
        assert!(!comp.contains(b.media_in));
        assert_eq!(comp.source_of(c.merge, Slot::Background), Some(a.merge));
        assert_eq!(
            comp.source_of(engine.media_out().unwrap(), Slot::Input),
            Some(c.merge)
        );
    }

    #[test]
    fn deleting_unknown_handles_fails() {
        let mut engine = engine();
        let a = engine.add_screen(&values(0.5, 0.5)).unwrap();
        engine.delete_screen(&a).unwrap();
        assert!(matches!(engine.delete_screen(&a), Err(SplitError::Engine(_))));
    }

    #[test]
    fn delete_all_leaves_canvas_and_media_out() {
        let mut engine = engine();
        engine.add_screen(&values(0.25, 0.25)).unwrap();
        engine.add_screen(&values(0.75, 0.75)).unwrap();

        engine.delete_all_screens().unwrap();
        let comp = engine.composition().unwrap();
        assert_eq!(comp.tool_count(), 2);
        assert!(engine.screens().is_empty());
        assert_eq!(
            comp.source_of(engine.media_out().unwrap(), Slot::Input),
            engine.canvas()
        );
    }

    #[test]
    fn refresh_global_updates_resolution_and_screens() {
        let mut engine = engine();
        let a = engine.add_screen(&values(0.25, 0.25)).unwrap();

        engine
            .refresh_global((1280, 720), &[&a], &[values(0.6, 0.4)])
            .unwrap();
        let comp = engine.composition().unwrap();
        assert_eq!(resolution_of(comp, engine.canvas().unwrap()), Some((1280, 720)));
        assert_eq!(
            comp.input(a.merge, "Center"),
            Some(&InputValue::Point(0.6, 0.4))
        );
    }

    #[test]
    fn refresh_global_rejects_mismatched_lengths() {
        let mut engine = engine();
        let a = engine.add_screen(&values(0.25, 0.25)).unwrap();
        assert!(engine.refresh_global((1920, 1080), &[&a], &[]).is_err());
    }

    #[test]
    fn closed_session_rejects_every_call() {
        let mut engine = engine();
        let a = engine.add_screen(&values(0.5, 0.5)).unwrap();
        engine.session_mut().close().unwrap();

        assert_eq!(engine.add_screen(&values(0.5, 0.5)), Err(SplitError::SessionClosed));
        assert_eq!(engine.delete_screen(&a), Err(SplitError::SessionClosed));
        assert_eq!(engine.delete_all_screens(), Err(SplitError::SessionClosed));
        assert_eq!(
            engine.refresh_global((1, 1), &[], &[]),
            Err(SplitError::SessionClosed)
        );
        assert_eq!(engine.add_canvas(1, 1), Err(SplitError::SessionClosed));
    }
}
