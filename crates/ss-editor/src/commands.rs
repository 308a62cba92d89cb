//! The fixed command table.
//!
//! Every operator action is one [`Command`] variant with a typed payload,
//! matched exhaustively by the controller. String keys only exist at the
//! textual edge ([`Command::from_key`]), which is the one place an unknown
//! key can still show up.

use ss_core::{CellCoord, ElementId, Result, ScreenId, SplitError};
use std::fmt;

/// A scalar geometry setting, addressed by its command key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    Width,
    Height,
    /// All four margins at once.
    Margin,
    Top,
    Left,
    Bottom,
    Right,
    Gutter,
    Cols,
    Rows,
}

impl Setting {
    pub const ALL: [Setting; 10] = [
        Setting::Width,
        Setting::Height,
        Setting::Margin,
        Setting::Top,
        Setting::Left,
        Setting::Bottom,
        Setting::Right,
        Setting::Gutter,
        Setting::Cols,
        Setting::Rows,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Setting::Width => "width",
            Setting::Height => "height",
            Setting::Margin => "margin",
            Setting::Top => "top",
            Setting::Left => "left",
            Setting::Bottom => "bottom",
            Setting::Right => "right",
            Setting::Gutter => "gutter",
            Setting::Cols => "cols",
            Setting::Rows => "rows",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Change one geometry setting. Equal to the current value → no-op.
    Set(Setting, u32),
    /// Broadcast `top` to every edge and keep the margins linked.
    LinkMargins,
    /// Let each margin edge be set on its own again.
    UnlinkMargins,
    AddScreen {
        start: CellCoord,
        end: CellCoord,
    },
    /// Delete the screen currently drawn as this element.
    DeleteScreen(ElementId),
    DeleteAllScreens,
    /// Mirror every screen across the grid's vertical axis.
    FlipH,
    /// Mirror every screen across the grid's horizontal axis.
    FlipV,
}

/// Untyped value arriving with a textual command key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandValue {
    Int(i64),
    Cells(CellCoord, CellCoord),
}

impl Command {
    /// Resolve a command key and its optional value into a [`Command`].
    ///
    /// Keys: the [`Setting`] keys, `link`, `unlink`, `addScreen`,
    /// `deleteScreen`, `deleteAllScreens`, `flipH`, `flipV`.
    pub fn from_key(key: &str, value: Option<CommandValue>) -> Result<Self> {
        if let Some(setting) = Setting::from_key(key) {
            return match value {
                Some(CommandValue::Int(v)) => Ok(Command::Set(setting, to_u32(setting.key(), v)?)),
                Some(CommandValue::Cells(..)) => Err(SplitError::WrongValue(key.to_string())),
                None => Err(SplitError::MissingValue(key.to_string())),
            };
        }

        let bare = |command: Command| match value {
            None => Ok(command),
            Some(_) => Err(SplitError::WrongValue(key.to_string())),
        };

        match key {
            "link" => bare(Command::LinkMargins),
            "unlink" => bare(Command::UnlinkMargins),
            "deleteAllScreens" => bare(Command::DeleteAllScreens),
            "flipH" => bare(Command::FlipH),
            "flipV" => bare(Command::FlipV),
            "addScreen" => match value {
                Some(CommandValue::Cells(start, end)) => Ok(Command::AddScreen { start, end }),
                Some(CommandValue::Int(_)) => Err(SplitError::WrongValue(key.to_string())),
                None => Err(SplitError::MissingValue(key.to_string())),
            },
            "deleteScreen" => match value {
                Some(CommandValue::Int(v)) => {
                    let id = u64::try_from(v).map_err(|_| SplitError::invalid("element", v))?;
                    Ok(Command::DeleteScreen(ElementId(id)))
                }
                Some(CommandValue::Cells(..)) => Err(SplitError::WrongValue(key.to_string())),
                None => Err(SplitError::MissingValue(key.to_string())),
            },
            _ => Err(SplitError::UnknownCommand(key.to_string())),
        }
    }
}

fn to_u32(name: &'static str, value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| SplitError::invalid(name, value))
}

/// What a command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing was pushed to either adapter.
    Unchanged,
    /// Geometry changed and both adapters were refreshed.
    Synced,
    Added { id: ScreenId, element: ElementId },
    Deleted(ScreenId),
    /// Number of screens removed.
    Cleared(usize),
}
