//! Reaction catalog: the immutable pair → outcome table.
//!
//! DESIGN
//! ======
//! Entries are keyed by `PairKey`, built from the two reagent names sorted
//! byte-wise and joined with `+`. Every lookup goes through the same
//! constructor, so `(A, B)` and `(B, A)` always land on the same entry.
//! Absent pairs are not errors: they resolve to the "no reaction" outcome.
//!
//! The table can also be read from a JSON object of the form
//! `{"A+B": {"text": "...", "image": "x.png"}}`. Keys are re-canonicalized on
//! load, so authors need not sort them by hand.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::consts::{NO_REACTION_TEXT, PAIR_KEY_SEPARATOR};
use crate::error::ErrorCode;

// =============================================================================
// TYPES
// =============================================================================

/// What the user sees after two tokens react.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionOutcome {
    /// Description shown in the result panel.
    pub text: String,
    /// Result image file name, relative to the result image directory.
    #[serde(default)]
    pub image: Option<String>,
}

impl ReactionOutcome {
    #[must_use]
    pub fn new(text: impl Into<String>, image: Option<&str>) -> Self {
        Self { text: text.into(), image: image.map(str::to_string) }
    }

    /// The outcome of a pair with no catalog entry.
    #[must_use]
    pub fn no_reaction() -> Self {
        Self { text: NO_REACTION_TEXT.to_string(), image: None }
    }

    /// Whether this is the default outcome for an unknown pair.
    #[must_use]
    pub fn is_no_reaction(&self) -> bool {
        self.text == NO_REACTION_TEXT && self.image.is_none()
    }
}

/// Order-independent key for a pair of reagent names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey(String);

impl PairKey {
    /// Canonical key for `a` and `b` in either order.
    #[must_use]
    pub fn new(a: &str, b: &str) -> Self {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        Self(format!("{first}{PAIR_KEY_SEPARATOR}{second}"))
    }

    /// Parse a `"A+B"` key as written in a catalog file, canonicalizing it.
    ///
    /// # Errors
    ///
    /// Returns `MalformedKey` unless `raw` holds exactly two non-empty names.
    pub fn parse(raw: &str) -> Result<Self, CatalogError> {
        let mut parts = raw.split(PAIR_KEY_SEPARATOR);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(a), Some(b), None) if !a.trim().is_empty() && !b.trim().is_empty() => {
                Ok(Self::new(a.trim(), b.trim()))
            }
            _ => Err(CatalogError::MalformedKey(raw.to_string())),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("malformed pair key: {0:?}")]
    MalformedKey(String),
    #[error("duplicate entry for pair {0}")]
    Duplicate(PairKey),
    #[error("catalog read error: {0}")]
    Io(#[from] std::io::Error),
}

impl ErrorCode for CatalogError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Parse(_) => "E_CATALOG_PARSE",
            Self::MalformedKey(_) => "E_CATALOG_KEY",
            Self::Duplicate(_) => "E_CATALOG_DUPLICATE",
            Self::Io(_) => "E_CATALOG_IO",
        }
    }
}

// =============================================================================
// CATALOG
// =============================================================================

const BUILTIN_REACTIONS: [(&str, &str, &str, &str); 10] = [
    ("AgNO3", "KI", "yellow precipitate forms (AgI)", "yellow_precipitate.png"),
    ("AgNO3", "NaCl", "white precipitate forms (AgCl)", "white_precipitate.png"),
    ("BaCl2", "H2SO4", "white precipitate forms (BaSO4)", "white_precipitate.png"),
    ("CuSO4", "NaOH", "blue-green precipitate forms (Cu(OH)2)", "blue_precipitate.png"),
    ("CuSO4", "NH3", "deep blue complex forms ([Cu(NH3)4]2+)", "darkblue_solution.png"),
    ("HCl", "NaOH", "neutralization reaction (water + salt)", "gas_bubble.png"),
    ("KI", "Pb(NO3)2", "yellow precipitate forms (PbI2)", "yellow_precipitate.png"),
    ("AgNO3", "NH3", "complex ion forms ([Ag(NH3)2]+), clear solution", "transparent_complex.png"),
    ("H2SO4", "Pb(NO3)2", "white precipitate forms (PbSO4)", "white_precipitate(3).png"),
    ("NaCl", "Pb(NO3)2", "white precipitate forms (PbCl2)", "white_precipitate(4).png"),
];

/// Read-only table of reaction outcomes keyed by unordered reagent pairs.
#[derive(Debug, Clone, Default)]
pub struct ReactionCatalog {
    entries: HashMap<PairKey, ReactionOutcome>,
}

impl ReactionCatalog {
    /// The reference dataset of ten reactions.
    #[must_use]
    pub fn builtin() -> Self {
        let entries = BUILTIN_REACTIONS
            .iter()
            .map(|(a, b, text, image)| (PairKey::new(a, b), ReactionOutcome::new(*text, Some(*image))))
            .collect();
        Self { entries }
    }

    /// Build from `(a, b, outcome)` triples; names may come in either order.
    ///
    /// # Errors
    ///
    /// Returns `Duplicate` if two triples name the same unordered pair.
    pub fn from_entries<'a>(
        entries: impl IntoIterator<Item = (&'a str, &'a str, ReactionOutcome)>,
    ) -> Result<Self, CatalogError> {
        let mut map = HashMap::new();
        for (a, b, outcome) in entries {
            insert_unique(&mut map, PairKey::new(a, b), outcome)?;
        }
        Ok(Self { entries: map })
    }

    /// Parse a JSON key-value table.
    ///
    /// # Errors
    ///
    /// Returns `Parse` for invalid JSON, `MalformedKey` for keys that are not
    /// `"A+B"`, and `Duplicate` when two keys name the same pair.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let RawEntries(raw) = serde_json::from_str(json)?;
        let mut map = HashMap::with_capacity(raw.len());
        for (key, outcome) in raw {
            insert_unique(&mut map, PairKey::parse(&key)?, outcome)?;
        }
        Ok(Self { entries: map })
    }

    /// Read and parse a JSON catalog file.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file can't be read, otherwise as [`Self::from_json`].
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        tracing::debug!(
            path = %path.display(),
            entries = catalog.len(),
            keys = ?catalog.keys(),
            "reaction catalog loaded"
        );
        Ok(catalog)
    }

    /// Outcome of mixing `a` and `b`. Never fails; unknown pairs resolve to
    /// [`ReactionOutcome::no_reaction`].
    #[must_use]
    pub fn lookup(&self, a: &str, b: &str) -> ReactionOutcome {
        self.entries
            .get(&PairKey::new(a, b))
            .cloned()
            .unwrap_or_else(ReactionOutcome::no_reaction)
    }

    /// Whether the pair has an explicit entry.
    #[must_use]
    pub fn contains(&self, a: &str, b: &str) -> bool {
        self.entries.contains_key(&PairKey::new(a, b))
    }

    /// All keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<&PairKey> {
        let mut keys: Vec<&PairKey> = self.entries.keys().collect();
        keys.sort();
        keys
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn insert_unique(
    map: &mut HashMap<PairKey, ReactionOutcome>,
    key: PairKey,
    outcome: ReactionOutcome,
) -> Result<(), CatalogError> {
    if map.contains_key(&key) {
        return Err(CatalogError::Duplicate(key));
    }
    map.insert(key, outcome);
    Ok(())
}

/// Every `(key, outcome)` of a JSON object in document order. Repeated keys
/// are kept so they can be rejected as duplicates.
struct RawEntries(Vec<(String, ReactionOutcome)>);

impl<'de> Deserialize<'de> for RawEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RawEntriesVisitor)
    }
}

struct RawEntriesVisitor;

impl<'de> Visitor<'de> for RawEntriesVisitor {
    type Value = RawEntries;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping pair keys to reaction outcomes")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(entry) = access.next_entry::<String, ReactionOutcome>()? {
            entries.push(entry);
        }
        Ok(RawEntries(entries))
    }
}
