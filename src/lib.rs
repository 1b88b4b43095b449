//! Reaction bench engine for the chemistry lab simulation.
//!
//! Users place reagent tokens on a canvas and drag them next to each other;
//! when two token centers come within the proximity threshold the pair reacts,
//! both tokens leave the bench, and the outcome from the reaction catalog is
//! shown. This crate owns that logic. The host (a browser page or any other
//! surface) forwards gestures to the engine and redraws from the returned
//! [`session::Action`]s and [`render::Scene`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`session`] | Bench state: place, move-and-react, reset, dismiss |
//! | [`catalog`] | Unordered-pair reaction table |
//! | [`reagent`] | The reagent shelf |
//! | [`tokens`] | Placed tokens and their insertion-ordered store |
//! | [`hit`] | Proximity detection for a moved token |
//! | [`spawn`] | Where new tokens appear |
//! | [`input`] | Gestures forwarded by the surface |
//! | [`render`] | Scene snapshot and canvas drawing |
//! | [`config`] | Environment-driven configuration |
//! | [`geom`] | Points and distances |
//! | [`consts`] | Shared numeric constants (threshold, token size, spawn region) |
//! | [`error`] | Error code trait shared by the error enums |

pub mod catalog;
pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod geom;
pub mod hit;
pub mod input;
pub mod reagent;
pub mod render;
pub mod session;
pub mod spawn;
pub mod tokens;
