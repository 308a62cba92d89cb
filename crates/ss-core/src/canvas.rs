//! The root rectangular working area, in pixels.

use crate::error::{Result, SplitError};
use serde::{Deserialize, Serialize};

/// Canvas resolution. Both sides are always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canvas {
    width: u32,
    height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let mut canvas = Self {
            width: 1,
            height: 1,
        };
        canvas.set_width(width)?;
        canvas.set_height(height)?;
        Ok(canvas)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Any positive width is accepted; upper bounds are a UI concern.
    pub fn set_width(&mut self, width: u32) -> Result<()> {
        if width == 0 {
            return Err(SplitError::invalid("width", width));
        }
        self.width = width;
        Ok(())
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set_height(&mut self, height: u32) -> Result<()> {
        if height == 0 {
            return Err(SplitError::invalid("height", height));
        }
        self.height = height;
        Ok(())
    }

    /// `(width, height)`.
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}
