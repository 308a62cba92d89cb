//! The compositing engine's node graph.
//!
//! Tools are nodes; an edge `source → consumer` labelled with a [`Slot`]
//! means the consumer reads that input from the source. Every consumer has
//! at most one source per slot.

use petgraph::Direction;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use petgraph::visit::EdgeRef;
use ss_core::{Result, SplitError};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ToolKind {
    Background,
    Merge,
    RectangleMask,
    MediaIn,
    MediaOut,
}

impl ToolKind {
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Background => "Background",
            ToolKind::Merge => "Merge",
            ToolKind::RectangleMask => "RectangleMask",
            ToolKind::MediaIn => "MediaIn",
            ToolKind::MediaOut => "MediaOut",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Image input a tool can take from another tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Background,
    Foreground,
    EffectMask,
    Input,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputValue {
    Number(f64),
    Point(f64, f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tool {
    pub kind: ToolKind,
    pub name: String,
    pub inputs: BTreeMap<&'static str, InputValue>,
}

#[derive(Debug, Default)]
pub struct Composition {
    graph: StableDiGraph<Tool, Slot>,
    /// Per-kind counters used for tool names (`Merge1`, `Merge2`, …).
    named: HashMap<ToolKind, u32>,
}

impl Composition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_tool(&mut self, kind: ToolKind) -> NodeIndex {
        let n = self.named.entry(kind).or_insert(0);
        *n += 1;
        let name = format!("{kind}{n}");
        log::trace!("ADD tool {name}");
        self.graph.add_node(Tool {
            kind,
            name,
            inputs: BTreeMap::new(),
        })
    }

    /// Remove a tool together with every link touching it.
    pub fn remove_tool(&mut self, idx: NodeIndex) -> Option<Tool> {
        let removed = self.graph.remove_node(idx);
        if let Some(tool) = &removed {
            log::trace!("DELETE tool {}", tool.name);
        }
        removed
    }

    pub fn tool(&self, idx: NodeIndex) -> Option<&Tool> {
        self.graph.node_weight(idx)
    }

    pub fn rename(&mut self, idx: NodeIndex, name: impl Into<String>) -> Result<()> {
        let tool = self
            .graph
            .node_weight_mut(idx)
            .ok_or_else(|| missing_tool(idx))?;
        tool.name = name.into();
        Ok(())
    }

    pub fn contains(&self, idx: NodeIndex) -> bool {
        self.graph.contains_node(idx)
    }

    pub fn tool_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn count(&self, kind: ToolKind) -> usize {
        self.graph
            .node_weights()
            .filter(|tool| tool.kind == kind)
            .count()
    }

    pub fn tools(&self) -> impl Iterator<Item = (NodeIndex, &Tool)> {
        self.graph
            .node_indices()
            .filter_map(|idx| self.graph.node_weight(idx).map(|tool| (idx, tool)))
    }

    // ─── Inputs ─────────────────────────────────────────────────────────

    pub fn set_input(&mut self, idx: NodeIndex, key: &'static str, value: InputValue) -> Result<()> {
        let tool = self
            .graph
            .node_weight_mut(idx)
            .ok_or_else(|| missing_tool(idx))?;
        tool.inputs.insert(key, value);
        Ok(())
    }

    pub fn input(&self, idx: NodeIndex, key: &str) -> Option<&InputValue> {
        self.graph.node_weight(idx)?.inputs.get(key)
    }

    // ─── Links ──────────────────────────────────────────────────────────

    /// Feed `consumer`'s `slot` from `source`, replacing any previous source.
    pub fn connect(&mut self, source: NodeIndex, consumer: NodeIndex, slot: Slot) -> Result<()> {
        for idx in [source, consumer] {
            if !self.graph.contains_node(idx) {
                return Err(missing_tool(idx));
            }
        }
        self.disconnect(consumer, slot);
        self.graph.add_edge(source, consumer, slot);
        Ok(())
    }

    pub fn disconnect(&mut self, consumer: NodeIndex, slot: Slot) {
        let existing: Vec<_> = self
            .graph
            .edges_directed(consumer, Direction::Incoming)
            .filter(|e| *e.weight() == slot)
            .map(|e| e.id())
            .collect();
        for edge in existing {
            self.graph.remove_edge(edge);
        }
    }

    /// Tool currently feeding `consumer`'s `slot`.
    pub fn source_of(&self, consumer: NodeIndex, slot: Slot) -> Option<NodeIndex> {
        self.graph
            .edges_directed(consumer, Direction::Incoming)
            .find(|e| *e.weight() == slot)
            .map(|e| e.source())
    }
}

fn missing_tool(idx: NodeIndex) -> SplitError {
    SplitError::Engine(format!("no tool at node {}", idx.index()))
}
