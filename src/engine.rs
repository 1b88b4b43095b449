use tracing::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::catalog::{CatalogError, ReactionCatalog};
use crate::config::{ConfigError, LabConfig};
use crate::error::ErrorCode;
use crate::input::Gesture;
use crate::reagent::ReagentShelf;
use crate::render::{self, Scene};
use crate::session::{Action, LabError, LabSession};
use crate::spawn::SpawnStrategy;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl ErrorCode for StartupError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Catalog(e) => e.error_code(),
        }
    }
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub shelf: ReagentShelf,
    pub session: LabSession,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self { shelf: ReagentShelf::builtin(), session: LabSession::default() }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(shelf: ReagentShelf, session: LabSession) -> Self {
        Self { shelf, session }
    }

    /// Build from `LAB_*` environment variables, loading the catalog file
    /// when `LAB_CATALOG_PATH` is set.
    ///
    /// # Errors
    ///
    /// Returns the first config or catalog error encountered.
    pub fn from_env() -> Result<Self, StartupError> {
        let config = LabConfig::from_env()?;
        Self::from_config(config)
    }

    /// Build from an explicit config with random placement.
    ///
    /// # Errors
    ///
    /// Returns `Catalog` if `config.catalog_path` can't be loaded.
    pub fn from_config(config: LabConfig) -> Result<Self, StartupError> {
        let catalog = match &config.catalog_path {
            Some(path) => ReactionCatalog::load(path)?,
            None => ReactionCatalog::builtin(),
        };
        Ok(Self::new(ReagentShelf::builtin(), LabSession::new(catalog, config)))
    }

    /// Same shelf and catalog, placing tokens via `spawn`.
    #[must_use]
    pub fn with_spawn(spawn: Box<dyn SpawnStrategy>) -> Self {
        let session = LabSession::with_spawn(ReactionCatalog::builtin(), LabConfig::default(), spawn);
        Self::new(ReagentShelf::builtin(), session)
    }

    // --- Input ---

    /// Apply a gesture, returning the actions for the host to process.
    ///
    /// Rejected gestures are logged and produce no actions.
    pub fn handle(&mut self, gesture: Gesture) -> Vec<Action> {
        match self.try_handle(gesture) {
            Ok(actions) => actions,
            Err(e) => {
                warn!(error = %e, code = e.error_code(), "gesture rejected");
                Vec::new()
            }
        }
    }

    /// Apply a gesture, surfacing rejection to the caller.
    ///
    /// # Errors
    ///
    /// Returns `UnknownReagent` for a name not on the shelf and
    /// `TokenNotFound` for a drag of a token that is no longer on the bench.
    pub fn try_handle(&mut self, gesture: Gesture) -> Result<Vec<Action>, LabError> {
        debug!(?gesture, "gesture");
        let action = match gesture {
            Gesture::SelectReagent { name } => {
                let reagent = self.shelf.get(&name).ok_or(LabError::UnknownReagent(name))?;
                self.session.place(reagent)
            }
            Gesture::DragStop { id, x, y } => self.session.move_token(&id, x, y)?,
            Gesture::KeyDown { key } => {
                if !key.is_reset_activation() {
                    return Ok(Vec::new());
                }
                self.session.reset()
            }
            Gesture::Reset | Gesture::ResetAndClear => self.session.reset(),
            Gesture::Dismiss => self.session.dismiss_outcome(),
        };
        Ok(vec![action, Action::RenderNeeded])
    }

    // --- Queries ---

    /// Snapshot of everything the surface draws.
    #[must_use]
    pub fn scene(&self) -> Scene {
        Scene::build(&self.shelf, &self.session)
    }
}

/// The full lab engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, core: EngineCore) -> Self {
        Self { canvas, core }
    }

    pub fn handle(&mut self, gesture: Gesture) -> Vec<Action> {
        self.core.handle(gesture)
    }

    #[must_use]
    pub fn scene(&self) -> Scene {
        self.core.scene()
    }

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a draw call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let width = f64::from(self.canvas.width());
        let height = f64::from(self.canvas.height());
        render::draw(&ctx, &self.scene(), width, height)
    }
}
