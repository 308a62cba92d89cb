pub mod composition;
pub mod engine;
pub mod session;

pub use composition::{Composition, InputValue, Slot, Tool, ToolKind};
pub use engine::{NodeGraphEngine, ScreenHandles};
pub use session::EngineSession;

// Re-export petgraph types so downstream crates don't need a direct dependency
pub use petgraph::graph::NodeIndex;
