//! Default starting geometry.

use crate::canvas::Canvas;
use crate::error::{Result, SplitError};
use crate::grid::Grid;
use crate::margin::Margin;
use crate::screen::DEFAULT_SCREEN_SIZE;
use serde::{Deserialize, Serialize};

/// Geometry the application starts with. Missing JSON fields fall back to
/// [`GeometryConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    pub width: u32,
    pub height: u32,
    pub top: u32,
    pub left: u32,
    pub bottom: u32,
    pub right: u32,
    pub gutter: u32,
    pub cols: u32,
    pub rows: u32,
    /// Start with the four margins linked to `top`.
    pub linked: bool,
    /// Merge scale forwarded for every new screen.
    pub screen_size: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            top: 0,
            left: 0,
            bottom: 0,
            right: 0,
            gutter: 0,
            cols: 2,
            rows: 2,
            linked: false,
            screen_size: DEFAULT_SCREEN_SIZE,
        }
    }
}

impl GeometryConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| SplitError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject geometry that cannot produce a usable grid.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("cols", self.cols),
            ("rows", self.rows),
        ] {
            if value == 0 {
                return Err(SplitError::invalid(name, value));
            }
        }

        let gutters_x = u64::from(self.gutter) * u64::from(self.cols - 1);
        let gutters_y = u64::from(self.gutter) * u64::from(self.rows - 1);
        if u64::from(self.left) + u64::from(self.right) + gutters_x >= u64::from(self.width) {
            return Err(SplitError::Config(format!(
                "margins and gutters leave no room for {} columns in width {}",
                self.cols, self.width
            )));
        }
        if u64::from(self.top) + u64::from(self.bottom) + gutters_y >= u64::from(self.height) {
            return Err(SplitError::Config(format!(
                "margins and gutters leave no room for {} rows in height {}",
                self.rows, self.height
            )));
        }
        Ok(())
    }

    pub fn build_grid(&self) -> Result<Grid> {
        self.validate()?;
        let canvas = Canvas::new(self.width, self.height)?;
        let mut margin = Margin::new(self.top, self.left, self.bottom, self.right, self.gutter);
        if self.linked {
            margin.link();
        }
        log::debug!(
            "building {}x{} grid on {}x{} canvas",
            self.cols,
            self.rows,
            self.width,
            self.height
        );
        Grid::new(canvas, margin, self.cols, self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_uses_defaults() {
        let config = GeometryConfig::from_json(r#"{ "width": 1280, "cols": 3 }"#).unwrap();
        assert_eq!(config.width, 1280);
        assert_eq!(config.height, 1080);
        assert_eq!(config.cols, 3);
        assert_eq!(config.screen_size, DEFAULT_SCREEN_SIZE);
    }

    #[test]
    fn rejects_zero_rows() {
        let err = GeometryConfig::from_json(r#"{ "rows": 0 }"#).unwrap_err();
        assert_eq!(
            err,
            SplitError::InvalidDimension {
                name: "rows",
                value: 0
            }
        );
    }

    #[test]
    fn rejects_margins_wider_than_canvas() {
        let config = GeometryConfig {
            width: 100,
            left: 60,
            right: 40,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SplitError::Config(_))));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            GeometryConfig::from_json("{ width: }"),
            Err(SplitError::Config(_))
        ));
    }

    #[test]
    fn linked_config_builds_linked_margin() {
        let config = GeometryConfig {
            top: 24,
            left: 3,
            linked: true,
            ..Default::default()
        };
        let grid = config.build_grid().unwrap();
        assert!(grid.margin().is_linked());
        assert_eq!(grid.margin().all(), Some(24));
    }
}
