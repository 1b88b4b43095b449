//! Lab session: the mutable state of one experiment bench.
//!
//! DESIGN
//! ======
//! `LabSession` is the sole owner of the placed tokens and of the outcome
//! currently on display. Every operation runs to completion synchronously and
//! returns an [`Action`] describing what changed, so the surface can redraw
//! without diffing.
//!
//! A move re-evaluates reactions for the moved token only. Neighbors are
//! scanned in insertion order and the first one in range reacts; both tokens
//! leave the bench in the same step the outcome is set. At most one reaction
//! resolves per move.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use tracing::{debug, info};

use crate::catalog::{PairKey, ReactionCatalog, ReactionOutcome};
use crate::config::LabConfig;
use crate::error::ErrorCode;
use crate::geom::Point;
use crate::hit::first_reacting_neighbor;
use crate::reagent::Reagent;
use crate::spawn::{RandomSpawn, SpawnStrategy};
use crate::tokens::{PlacedToken, TokenId, TokenStore};

// =============================================================================
// TYPES
// =============================================================================

/// State changes reported back to the rendering surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    TokenPlaced(PlacedToken),
    TokenMoved { id: TokenId, x: f64, y: f64 },
    Reacted { moved: TokenId, partner: TokenId, outcome: ReactionOutcome },
    Cleared,
    OutcomeDismissed,
    RenderNeeded,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LabError {
    #[error("token not found: {0}")]
    TokenNotFound(TokenId),
    #[error("unknown reagent: {0}")]
    UnknownReagent(String),
}

impl ErrorCode for LabError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::TokenNotFound(_) => "E_TOKEN_NOT_FOUND",
            Self::UnknownReagent(_) => "E_UNKNOWN_REAGENT",
        }
    }
}

// =============================================================================
// SESSION
// =============================================================================

pub struct LabSession {
    tokens: TokenStore,
    outcome: Option<ReactionOutcome>,
    catalog: ReactionCatalog,
    config: LabConfig,
    spawn: Box<dyn SpawnStrategy>,
}

impl LabSession {
    /// Empty bench with random token placement.
    #[must_use]
    pub fn new(catalog: ReactionCatalog, config: LabConfig) -> Self {
        Self::with_spawn(catalog, config, Box::new(RandomSpawn::new()))
    }

    /// Empty bench placing tokens where `spawn` says.
    #[must_use]
    pub fn with_spawn(catalog: ReactionCatalog, config: LabConfig, spawn: Box<dyn SpawnStrategy>) -> Self {
        Self { tokens: TokenStore::new(), outcome: None, catalog, config, spawn }
    }

    // --- Operations ---

    /// Put a new token for `reagent` on the bench. Always succeeds.
    pub fn place(&mut self, reagent: &Reagent) -> Action {
        let at = self.spawn.next_position(&self.config.spawn);
        let token = PlacedToken::new(reagent, at);
        debug!(id = %token.id, reagent = %token.reagent, x = token.x, y = token.y, "token placed");
        self.tokens.push(token.clone());
        Action::TokenPlaced(token)
    }

    /// Move a token's top-left corner to `(x, y)` and resolve at most one
    /// reaction with it.
    ///
    /// # Errors
    ///
    /// Returns `TokenNotFound` if `id` isn't on the bench; nothing changes.
    pub fn move_token(&mut self, id: &TokenId, x: f64, y: f64) -> Result<Action, LabError> {
        if !self.tokens.set_position(id, Point::new(x, y)) {
            return Err(LabError::TokenNotFound(*id));
        }
        debug!(%id, x, y, "token moved");
        Ok(self.evaluate(id).unwrap_or(Action::TokenMoved { id: *id, x, y }))
    }

    /// Clear the bench and the outcome.
    pub fn reset(&mut self) -> Action {
        debug!(tokens = self.tokens.len(), "bench reset");
        self.tokens.clear();
        self.outcome = None;
        Action::Cleared
    }

    /// Hide the current outcome, keeping the tokens.
    pub fn dismiss_outcome(&mut self) -> Action {
        debug!(had_outcome = self.outcome.is_some(), "outcome dismissed");
        self.outcome = None;
        Action::OutcomeDismissed
    }

    fn evaluate(&mut self, moved: &TokenId) -> Option<Action> {
        let hit = first_reacting_neighbor(
            &self.tokens,
            moved,
            self.config.token_size,
            self.config.proximity_threshold,
        )?;
        let (m, c) = self.tokens.remove_pair(moved, &hit.partner)?;
        let outcome = self.catalog.lookup(&m.reagent, &c.reagent);
        info!(
            pair = %PairKey::new(&m.reagent, &c.reagent),
            distance = hit.distance,
            outcome = %outcome.text,
            "reaction resolved"
        );
        self.outcome = Some(outcome.clone());
        Some(Action::Reacted { moved: m.id, partner: c.id, outcome })
    }

    // --- Queries ---

    /// Tokens on the bench, in insertion (scan) order.
    pub fn tokens(&self) -> impl Iterator<Item = &PlacedToken> {
        self.tokens.iter()
    }

    /// Number of tokens on the bench.
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Look up a token by id.
    #[must_use]
    pub fn token(&self, id: &TokenId) -> Option<&PlacedToken> {
        self.tokens.get(id)
    }

    /// The outcome on display, if any.
    #[must_use]
    pub fn outcome(&self) -> Option<&ReactionOutcome> {
        self.outcome.as_ref()
    }

    #[must_use]
    pub fn catalog(&self) -> &ReactionCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &LabConfig {
        &self.config
    }
}

impl Default for LabSession {
    fn default() -> Self {
        Self::new(ReactionCatalog::builtin(), LabConfig::default())
    }
}
