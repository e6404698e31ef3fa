//! Configuration file loading for etch.
//!
//! Reads `etch.config.json` from the current working directory, or the file
//! given with `--config`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use etch_atelier::{Component, Engine, EtchOptions};
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

pub const CONFIG_FILE: &str = "etch.config.json";

/// Top-level etch configuration.
///
/// ```json
/// {
///   "parser": { "whitespace": "preserve" },
///   "render": { "rootMarker": false },
///   "aliases": { "Card": "section" }
/// }
/// ```
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EtchConfig {
    /// JSON Schema reference (for editor autocompletion).
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(flatten)]
    pub options: EtchOptions,

    /// Component names that render as host elements.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub aliases: BTreeMap<String, String>,
}

impl EtchConfig {
    /// An engine with these options and aliases registered.
    pub fn engine(&self) -> CliResult<Engine> {
        let mut engine = Engine::with_options(self.options);
        engine.register(
            self.aliases
                .iter()
                .map(|(name, tag)| (name.as_str(), Component::alias(tag.as_str()))),
        )?;
        Ok(engine)
    }
}

/// Load the config at `path`, or `etch.config.json` in the working directory.
///
/// A missing default file yields the default config; a missing explicit file
/// is an error.
pub fn load_config(path: Option<&Path>) -> CliResult<EtchConfig> {
    let (config_path, explicit) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (
            std::env::current_dir()
                .unwrap_or_default()
                .join(CONFIG_FILE),
            false,
        ),
    };

    if !explicit && !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "no config file");
        return Ok(EtchConfig::default());
    }

    let content = std::fs::read_to_string(&config_path).map_err(|source| CliError::Read {
        path: config_path.clone(),
        source,
    })?;
    let config = parse_config(&content, config_path.clone())?;
    tracing::debug!(
        path = %config_path.display(),
        aliases = config.aliases.len(),
        "loaded config"
    );
    Ok(config)
}

fn parse_config(content: &str, path: PathBuf) -> CliResult<EtchConfig> {
    serde_json::from_str(content).map_err(|source| CliError::Config { path, source })
}
