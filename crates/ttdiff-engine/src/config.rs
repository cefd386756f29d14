//! Engine configuration
//!
//! ```toml
//! canonicalize = true
//! strict_version_order = false
//! log_profile = "development"
//! ```
//!
//! Every key is optional; missing keys take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use ttdiff_core::logging_facility::Profile;
use ttdiff_core::DiffOptions;

use crate::errors::{config_error, io_error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Run the canonicalizer after parsing
    pub canonicalize: bool,
    /// Require `left.version < right.version` when diffing
    pub strict_version_order: bool,
    pub log_profile: Profile,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            canonicalize: true,
            strict_version_order: false,
            log_profile: Profile::Development,
        }
    }
}

impl EngineConfig {
    /// Parse a TOML document
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` error for malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| config_error(None, &e.to_string()))
    }

    /// Read and parse a TOML file
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if the file cannot be read, otherwise as
    /// [`EngineConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|e| io_error("config_load", path, e))?;
        toml::from_str(&text).map_err(|e| config_error(Some(path), &e.to_string()))
    }

    pub fn diff_options(&self) -> DiffOptions {
        DiffOptions {
            strict_version_order: self.strict_version_order,
        }
    }
}
