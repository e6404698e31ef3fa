//! Engine options.

use etch_relief::ParserOptions;
use serde::{Deserialize, Serialize};

/// Output options for string rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    /// Add ` data-reactroot=""` to the first element of every render
    pub root_marker: bool,
    /// Plain HTML: no root marker and no `<!-- -->` text separators
    pub static_markup: bool,
    /// Nested component invocations allowed before rendering fails
    pub max_depth: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            root_marker: true,
            static_markup: false,
            max_depth: 256,
        }
    }
}

impl RenderOptions {
    pub fn static_markup() -> Self {
        Self {
            static_markup: true,
            ..Self::default()
        }
    }
}

/// All options of an engine.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EtchOptions {
    pub parser: ParserOptions,
    pub render: RenderOptions,
}
