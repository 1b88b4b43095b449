//! Lab configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

use crate::consts::{PROXIMITY_THRESHOLD, REAGENT_IMAGE_DIR, RESULT_IMAGE_DIR, TOKEN_SIZE};
use crate::error::ErrorCode;
use crate::spawn::SpawnRegion;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
    #[error("out of range: {0}")]
    Range(String),
}

impl ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Invalid { .. } => "E_CONFIG_INVALID",
            Self::Range(_) => "E_CONFIG_RANGE",
        }
    }
}

/// Where the surface loads images from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetDirs {
    /// Reagent (flask) images.
    pub reagent_dir: String,
    /// Reaction result images.
    pub result_dir: String,
}

impl Default for AssetDirs {
    fn default() -> Self {
        Self { reagent_dir: REAGENT_IMAGE_DIR.to_string(), result_dir: RESULT_IMAGE_DIR.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabConfig {
    /// Center distance below which two tokens react.
    pub proximity_threshold: f64,
    /// Rendered token edge length; centers sit at half of it.
    pub token_size: f64,
    pub spawn: SpawnRegion,
    pub assets: AssetDirs,
    /// JSON catalog to load instead of the built-in reactions.
    pub catalog_path: Option<PathBuf>,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            proximity_threshold: PROXIMITY_THRESHOLD,
            token_size: TOKEN_SIZE,
            spawn: SpawnRegion::default(),
            assets: AssetDirs::default(),
            catalog_path: None,
        }
    }
}

impl LabConfig {
    /// Build typed lab config from environment variables.
    ///
    /// All optional:
    /// - `LAB_PROXIMITY_THRESHOLD`: default 80
    /// - `LAB_TOKEN_SIZE`: default 80
    /// - `LAB_SPAWN_X_MIN` / `LAB_SPAWN_X_MAX`: default 100 / 300
    /// - `LAB_SPAWN_Y_MIN` / `LAB_SPAWN_Y_MAX`: default 100 / 200
    /// - `LAB_REAGENT_IMAGE_DIR`: default `/images`
    /// - `LAB_RESULT_IMAGE_DIR`: default `/images/results`
    /// - `LAB_CATALOG_PATH`: built-in catalog when absent
    ///
    /// # Errors
    ///
    /// Returns `Invalid` for unparseable numbers and `Range` for a
    /// non-positive threshold or token size, or an inverted spawn range.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var_os(key).map(|v| v.to_string_lossy().into_owned()))
    }

    /// Same as [`Self::from_env`], reading values through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`Self::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let spawn = SpawnRegion {
            x_min: parse_f64(&lookup, "LAB_SPAWN_X_MIN", defaults.spawn.x_min)?,
            x_max: parse_f64(&lookup, "LAB_SPAWN_X_MAX", defaults.spawn.x_max)?,
            y_min: parse_f64(&lookup, "LAB_SPAWN_Y_MIN", defaults.spawn.y_min)?,
            y_max: parse_f64(&lookup, "LAB_SPAWN_Y_MAX", defaults.spawn.y_max)?,
        };
        let assets = AssetDirs {
            reagent_dir: dir_or(&lookup, "LAB_REAGENT_IMAGE_DIR", defaults.assets.reagent_dir),
            result_dir: dir_or(&lookup, "LAB_RESULT_IMAGE_DIR", defaults.assets.result_dir),
        };
        let config = Self {
            proximity_threshold: parse_f64(&lookup, "LAB_PROXIMITY_THRESHOLD", defaults.proximity_threshold)?,
            token_size: parse_f64(&lookup, "LAB_TOKEN_SIZE", defaults.token_size)?,
            spawn,
            assets,
            catalog_path: lookup("LAB_CATALOG_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the session relies on.
    ///
    /// # Errors
    ///
    /// Returns `Range` describing the first violated bound.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.proximity_threshold <= 0.0 {
            return Err(ConfigError::Range(format!("proximity threshold must be positive, got {}", self.proximity_threshold)));
        }
        if self.token_size <= 0.0 {
            return Err(ConfigError::Range(format!("token size must be positive, got {}", self.token_size)));
        }
        if self.spawn.x_max < self.spawn.x_min {
            return Err(ConfigError::Range(format!(
                "spawn x range inverted: {} > {}",
                self.spawn.x_min, self.spawn.x_max
            )));
        }
        if self.spawn.y_max < self.spawn.y_min {
            return Err(ConfigError::Range(format!(
                "spawn y range inverted: {} > {}",
                self.spawn.y_min, self.spawn.y_max
            )));
        }
        Ok(())
    }
}

fn parse_f64(lookup: &impl Fn(&str) -> Option<String>, var: &'static str, default: f64) -> Result<f64, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ConfigError::Invalid { var, value: raw }),
    }
}

fn dir_or(lookup: &impl Fn(&str) -> Option<String>, var: &str, default: String) -> String {
    match lookup(var) {
        Some(dir) if !dir.trim().is_empty() => dir.trim_end_matches('/').to_string(),
        _ => default,
    }
}
