//! CLI configuration file.
//!
//! ```json
//! {
//!   "log":     { "level": "info", "components": { "chaintx-multiversx": "debug" }, "json": false },
//!   "decoder": { "address_hrp": "erd" }
//! }
//! ```
//! Every section and field is optional.

use anyhow::{Context, Result};
use chaintx_multiversx::DecoderConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::logging::LogConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub decoder: DecoderConfig,
}

impl CliConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid config JSON")
    }

    /// Load from `path`, or return defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file '{}'", path.display()))?;
        Self::from_json(&content).with_context(|| format!("in '{}'", path.display()))
    }

    /// Raise the log level to `debug` for `--verbose`.
    pub fn apply_verbose(&mut self, verbose: bool) {
        if verbose {
            self.log.level = "debug".into();
        }
    }
}
