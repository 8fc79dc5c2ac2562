//! Module: keypage-config
//! Responsibility: per-endpoint cursor paging configuration read from TOML.
//! Does not own: token encoding or page planning (see `keypage-core`).
//!
//! ```toml
//! max_results = 25
//!
//! [[sort]]
//! property = "age"
//!
//! [[sort]]
//! property = "id"
//! direction = "desc"
//! ```

use keypage_core::sort::{OrderDirection, SortSpec, SortSpecError};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error as ThisError;

/// Page size used when `max_results` is omitted.
pub const DEFAULT_MAX_RESULTS: u32 = 10;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read cursor config '{path}': {message}")]
    Io { path: String, message: String },

    #[error("invalid cursor config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("cursor config must declare at least one sort property")]
    EmptySort,

    #[error("cursor config max_results must be greater than zero")]
    ZeroMaxResults,

    #[error("cursor config sort is invalid: {0}")]
    Sort(#[from] SortSpecError),
}

///
/// OrderConfig
///
/// One sort column; `direction` defaults to ascending.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OrderConfig {
    pub property: String,
    #[serde(default)]
    pub direction: OrderDirection,
}

impl OrderConfig {
    #[must_use]
    pub fn new(property: impl Into<String>, direction: OrderDirection) -> Self {
        Self {
            property: property.into(),
            direction,
        }
    }
}

///
/// CursorConfig
///
/// Paging settings for one cursor-paged endpoint.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CursorConfig {
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    #[serde(default)]
    pub sort: Vec<OrderConfig>,
}

const fn default_max_results() -> u32 {
    DEFAULT_MAX_RESULTS
}

impl CursorConfig {
    /// Build a config in code; still subject to `validate`.
    #[must_use]
    pub const fn new(max_results: u32, sort: Vec<OrderConfig>) -> Self {
        Self { max_results, sort }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;

        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|err| ConfigError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;

        Self::from_toml_str(&source)
    }

    /// Check the invariants a parsed config must hold before use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sort.is_empty() {
            return Err(ConfigError::EmptySort);
        }
        if self.max_results == 0 {
            return Err(ConfigError::ZeroMaxResults);
        }
        self.sort_spec()?;

        Ok(())
    }

    /// Sort specification in declaration order.
    pub fn sort_spec(&self) -> Result<SortSpec, ConfigError> {
        if self.sort.is_empty() {
            return Err(ConfigError::EmptySort);
        }

        let spec = SortSpec::new(
            self.sort
                .iter()
                .map(|order| (order.property.as_str(), order.direction)),
        )?;

        Ok(spec)
    }

    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.max_results
    }
}

///
/// TESTS
///
