//! Coordinator configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config.
//!
//! ```toml
//! evict_on_dismiss = true
//! ```

use crate::error::{InvalidConfigSnafu, ReadConfigSnafu};
use serde::Deserialize;
use snafu::ResultExt;
use std::path::Path;

/// Settings shared by coordinators and their cleanup monitors.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoordinatorConfig {
    /// Treat a dismissed modal screen like a popped one and evict its child coordinator.
    pub evict_on_dismiss: bool,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            evict_on_dismiss: true,
        }
    }
}

impl CoordinatorConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> crate::Result<Self> {
        toml::from_str(text).context(InvalidConfigSnafu)
    }

    /// Read and parse a config file.
    pub fn load(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).context(ReadConfigSnafu { path })?;
        Self::from_toml_str(&text)
    }
}
