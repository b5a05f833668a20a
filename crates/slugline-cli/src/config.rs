//! `slugline.toml` loading.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use slugline::{EmitOptions, ExtractOptions, ValidateOptions};

use crate::CliError;

/// Options for every pass, read from the `[extract]`, `[validate]` and
/// `[emit]` tables. Missing tables and keys take their defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub extract: ExtractOptions,
    pub validate: ValidateOptions,
    pub emit: EmitOptions,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = toml::from_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}
