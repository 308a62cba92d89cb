//! Error type shared by every SplitScreener crate.

use crate::id::ElementId;
use thiserror::Error;

/// Failures surfaced to the caller of a controller command or adapter call.
///
/// All of them are local and synchronous. Nothing is retried; the operator
/// re-issues a corrected command.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SplitError {
    /// A dimension outside its allowed range (zero canvas size, fewer than
    /// one column or row, a negative margin, a cell outside the grid).
    #[error("invalid {name}: {value}")]
    InvalidDimension {
        /// Which setting was rejected.
        name: &'static str,
        /// The offending value.
        value: i64,
    },

    /// No live screen is drawn as this element.
    #[error("no screen is drawn as element {0}")]
    NotFound(ElementId),

    /// The command key is not in the command table.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// The command key needs a value and none was given.
    #[error("command `{0}` requires a value")]
    MissingValue(String),

    /// The compositing engine rejected a call.
    #[error("engine: {0}")]
    Engine(String),

    /// The rendering surface rejected a call.
    #[error("render: {0}")]
    Render(String),

    /// The command key was given a value of the wrong kind, or a value it
    /// does not take.
    #[error("command `{0}` got a value of the wrong kind")]
    WrongValue(String),

    /// The engine session was used after it was closed.
    #[error("engine session is closed")]
    SessionClosed,

    /// Invalid or unreadable geometry configuration.
    #[error("config: {0}")]
    Config(String),
}

impl SplitError {
    /// Shorthand for [`SplitError::InvalidDimension`].
    pub fn invalid(name: &'static str, value: impl Into<i64>) -> Self {
        SplitError::InvalidDimension {
            name,
            value: value.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SplitError>;
