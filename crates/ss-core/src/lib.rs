pub mod canvas;
pub mod config;
pub mod error;
pub mod grid;
pub mod id;
pub mod margin;
pub mod screen;

pub use canvas::Canvas;
pub use config::GeometryConfig;
pub use error::{Result, SplitError};
pub use grid::{CellCoord, Grid, GridCell, NormRect};
pub use id::{ElementId, ScreenId, find_first_missing};
pub use margin::Margin;
pub use screen::{DEFAULT_SCREEN_SIZE, Screen, ScreenValues};
