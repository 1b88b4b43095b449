//! Token model: reagent instances placed on the canvas, and the store that
//! owns them.
//!
//! The store keeps insertion order. Reaction evaluation scans neighbors in
//! that order and the first qualifying neighbor wins, so the order is part of
//! the observable behavior, not an implementation detail.

#[cfg(test)]
#[path = "tokens_test.rs"]
mod tokens_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geom::Point;
use crate::reagent::Reagent;

/// Unique identifier for a placed token.
pub type TokenId = Uuid;

/// A reagent instance on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedToken {
    /// Unique per placement.
    pub id: TokenId,
    /// Name of the reagent this token stands for.
    pub reagent: String,
    /// Reagent image file name.
    pub image: String,
    /// Left edge in canvas coordinates.
    pub x: f64,
    /// Top edge in canvas coordinates.
    pub y: f64,
}

impl PlacedToken {
    /// A fresh token for `reagent` with its top-left corner at `at`.
    #[must_use]
    pub fn new(reagent: &Reagent, at: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            reagent: reagent.name.clone(),
            image: reagent.image.clone(),
            x: at.x,
            y: at.y,
        }
    }

    /// Top-left corner.
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Insertion-ordered store of the tokens currently on the canvas.
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    tokens: Vec<PlacedToken>,
}

impl TokenStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Append a token at the end of the scan order.
    pub fn push(&mut self, token: PlacedToken) {
        self.tokens.push(token);
    }

    /// Return a reference to a token by id.
    #[must_use]
    pub fn get(&self, id: &TokenId) -> Option<&PlacedToken> {
        self.tokens.iter().find(|t| t.id == *id)
    }

    /// Move a token's top-left corner. Returns false if the token doesn't exist.
    pub fn set_position(&mut self, id: &TokenId, at: Point) -> bool {
        let Some(token) = self.tokens.iter_mut().find(|t| t.id == *id) else {
            return false;
        };
        token.x = at.x;
        token.y = at.y;
        true
    }

    /// Remove a token by id, returning it if it was present.
    pub fn remove(&mut self, id: &TokenId) -> Option<PlacedToken> {
        let idx = self.tokens.iter().position(|t| t.id == *id)?;
        Some(self.tokens.remove(idx))
    }

    /// Remove both tokens of a pair in one step. Nothing is removed unless
    /// both are present.
    pub fn remove_pair(&mut self, a: &TokenId, b: &TokenId) -> Option<(PlacedToken, PlacedToken)> {
        if a == b || self.get(a).is_none() || self.get(b).is_none() {
            return None;
        }
        let first = self.remove(a)?;
        let second = self.remove(b)?;
        Some((first, second))
    }

    /// All tokens in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PlacedToken> {
        self.tokens.iter()
    }

    /// Drop every token.
    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    /// Number of tokens currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if the store contains no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
