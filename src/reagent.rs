//! Reagents: the chemicals a user can pick from the shelf.
//!
//! The shelf is fixed at startup. Its order is the order the surface lays the
//! selection buttons out in.

#[cfg(test)]
#[path = "reagent_test.rs"]
mod reagent_test;

use serde::{Deserialize, Serialize};

/// A named chemical with the image its tokens are drawn with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reagent {
    /// Identifier, also the label shown to the user (e.g. `"HCl"`).
    pub name: String,
    /// Image file name, relative to the reagent image directory.
    pub image: String,
}

impl Reagent {
    #[must_use]
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self { name: name.into(), image: image.into() }
    }
}

const BUILTIN_REAGENTS: [(&str, &str); 10] = [
    ("HCl", "flask_red.png"),
    ("NaOH", "flask_blue.png"),
    ("CuSO4", "flask_green.png"),
    ("NaCl", "flask_silver.png"),
    ("AgNO3", "flask_darkgray.png"),
    ("KI", "flask_yellow.png"),
    ("BaCl2", "flask_purple.png"),
    ("Pb(NO3)2", "flask_orange.png"),
    ("H2SO4", "flask_black.png"),
    ("NH3", "flask_teal.png"),
];

/// Ordered, read-only list of the reagents available to the user.
#[derive(Debug, Clone)]
pub struct ReagentShelf {
    reagents: Vec<Reagent>,
}

impl ReagentShelf {
    /// The ten reagents of the standard lab.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_reagents(
            BUILTIN_REAGENTS
                .iter()
                .map(|(name, image)| Reagent::new(*name, *image)),
        )
    }

    /// Build a shelf from an arbitrary list, keeping its order.
    #[must_use]
    pub fn from_reagents(reagents: impl IntoIterator<Item = Reagent>) -> Self {
        Self { reagents: reagents.into_iter().collect() }
    }

    /// Find a reagent by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Reagent> {
        self.reagents.iter().find(|r| r.name == name)
    }

    /// All reagents in shelf order.
    pub fn iter(&self) -> impl Iterator<Item = &Reagent> {
        self.reagents.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.reagents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reagents.is_empty()
    }
}

impl Default for ReagentShelf {
    fn default() -> Self {
        Self::builtin()
    }
}
