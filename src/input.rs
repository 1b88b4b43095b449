//! Input model: the gestures the rendering surface forwards to the lab.
//!
//! The surface translates raw DOM events (button clicks, drag-stop, key
//! presses on the root element) into [`Gesture`]s. Keys other than the reset
//! activation keys carry no meaning and are dropped by the engine.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::tokens::TokenId;

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"Enter"`, `" "`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key(pub String);

impl Key {
    /// Enter and Space on the root surface reset the bench.
    #[must_use]
    pub fn is_reset_activation(&self) -> bool {
        matches!(self.0.as_str(), "Enter" | " " | "Spacebar")
    }
}

/// A user gesture delivered by the surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Gesture {
    /// A reagent button on the shelf was clicked.
    SelectReagent { name: String },
    /// A drag ended with the token's top-left corner at `(x, y)`.
    DragStop { id: TokenId, x: f64, y: f64 },
    /// The bench reset control.
    Reset,
    /// A key pressed while the root surface has focus.
    KeyDown { key: Key },
    /// "Keep experimenting" on the outcome panel.
    Dismiss,
    /// "Reset experiment" on the outcome panel. Same effect as `Reset`.
    ResetAndClear,
}
