//! Parser options.

use serde::{Deserialize, Serialize};

/// Parser options
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParserOptions {
    /// Whitespace handling for literal text runs
    pub whitespace: WhitespaceStrategy,
    /// Decode character references in literal text and attribute values
    pub decode_entities: bool,
    /// Whether is a void tag
    #[serde(skip, default = "default_is_void_tag")]
    pub is_void_tag: fn(&str) -> bool,
}

fn default_is_void_tag() -> fn(&str) -> bool {
    etch_carton::is_void_tag
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            whitespace: WhitespaceStrategy::Condense,
            decode_entities: true,
            is_void_tag: etch_carton::is_void_tag,
        }
    }
}

/// How text between tags is condensed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WhitespaceStrategy {
    /// Trim around line breaks and collapse multi-line runs to single spaces,
    /// dropping runs that are only indentation
    #[default]
    Condense,
    /// Keep literal text exactly as written
    Preserve,
}
