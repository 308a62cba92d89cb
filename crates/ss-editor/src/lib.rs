pub mod adapter;
pub mod commands;
pub mod controller;

pub use adapter::{EngineSync, RenderSurface};
pub use commands::{Command, CommandValue, Outcome, Setting};
pub use controller::{Controller, ScreenRecord};
