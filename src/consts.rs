//! Shared numeric and string constants for the lab.

// ── Geometry ────────────────────────────────────────────────────

/// Center distance below which two tokens react, in canvas units.
pub const PROXIMITY_THRESHOLD: f64 = 80.0;

/// Rendered edge length of a token. Centers sit at half this size from the
/// token's top-left corner on both axes.
pub const TOKEN_SIZE: f64 = 80.0;

// ── Spawn region ────────────────────────────────────────────────

/// Left edge of the region new tokens appear in.
pub const SPAWN_X_MIN: f64 = 100.0;

/// Right edge (exclusive) of the spawn region.
pub const SPAWN_X_MAX: f64 = 300.0;

/// Top edge of the spawn region.
pub const SPAWN_Y_MIN: f64 = 100.0;

/// Bottom edge (exclusive) of the spawn region.
pub const SPAWN_Y_MAX: f64 = 200.0;

// ── Catalog ─────────────────────────────────────────────────────

/// Joins the two sorted reagent names of a pair key. Never valid inside a name.
pub const PAIR_KEY_SEPARATOR: char = '+';

/// Text of the outcome used when a pair has no catalog entry.
pub const NO_REACTION_TEXT: &str = "no reaction";

// ── Assets ──────────────────────────────────────────────────────

/// Directory reagent images are served from.
pub const REAGENT_IMAGE_DIR: &str = "/images";

/// Directory reaction result images are served from.
pub const RESULT_IMAGE_DIR: &str = "/images/results";
