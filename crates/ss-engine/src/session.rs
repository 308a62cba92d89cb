//! Explicit lifecycle for the engine's current composition.

use crate::composition::Composition;
use ss_core::{Result, SplitError};

/// An open connection to one composition. Every access after [`close`]
/// fails with [`SplitError::SessionClosed`].
///
/// [`close`]: EngineSession::close
#[derive(Debug)]
pub struct EngineSession {
    name: String,
    composition: Option<Composition>,
}

impl EngineSession {
    pub fn open(name: impl Into<String>) -> Self {
        let name = name.into();
        log::info!("engine session '{name}' opened");
        Self {
            name,
            composition: Some(Composition::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_open(&self) -> bool {
        self.composition.is_some()
    }

    pub fn composition(&self) -> Result<&Composition> {
        self.composition.as_ref().ok_or(SplitError::SessionClosed)
    }

    pub fn composition_mut(&mut self) -> Result<&mut Composition> {
        self.composition.as_mut().ok_or(SplitError::SessionClosed)
    }

    /// End the session and hand back the final composition.
    pub fn close(&mut self) -> Result<Composition> {
        let composition = self.composition.take().ok_or(SplitError::SessionClosed)?;
        log::info!(
            "engine session '{}' closed ({} tools)",
            self.name,
            composition.tool_count()
        );
        Ok(composition)
    }
}
