//! Proximity detection between a moved token and the rest of the canvas.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::geom::token_center;
use crate::tokens::{TokenId, TokenStore};

/// The neighbor a moved token reacts with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityHit {
    pub partner: TokenId,
    /// Distance between the two token centers.
    pub distance: f64,
}

/// Find the first token, in insertion order, whose center lies strictly
/// closer than `threshold` to the center of `moved`.
///
/// Later, closer neighbors are not considered once one qualifies. Returns
/// `None` if `moved` isn't in the store or nothing is in range.
#[must_use]
pub fn first_reacting_neighbor(
    tokens: &TokenStore,
    moved: &TokenId,
    token_size: f64,
    threshold: f64,
) -> Option<ProximityHit> {
    let center = token_center(tokens.get(moved)?.position(), token_size);
    tokens
        .iter()
        .filter(|other| other.id != *moved)
        .map(|other| ProximityHit {
            partner: other.id,
            distance: center.distance(token_center(other.position(), token_size)),
        })
        .find(|hit| hit.distance < threshold)
}
