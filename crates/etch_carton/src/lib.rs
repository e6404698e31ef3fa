//! Carton - The artist's toolbox for Etch.
//!
//! This crate provides the foundational lookup tables and string utilities the
//! Etch compiler and renderer share, much like a carton (artist's portfolio case)
//! holds all the essential tools and materials an artist needs for their work.
//!
//! # Modules
//!
//! - **dom_tag_config**: void elements, newline-eating tags, custom elements
//! - **dom_props**: the DOM property table that decides how attributes serialize
//! - **style**: inline style helpers (unitless properties, hyphenation)
//! - **escape**: HTML escaping and entity decoding
//! - **general**: number formatting and naming helpers
//!
//! # Example
//!
//! ```
//! use etch_carton::{escape_html, is_void_tag, property_info};
//!
//! assert!(is_void_tag("img"));
//! assert_eq!(escape_html("<b>"), "&lt;b&gt;");
//! assert_eq!(property_info("className").map(|p| p.attribute_name), Some("class"));
//! ```

pub mod dom_props;
pub mod dom_tag_config;
pub mod escape;
pub mod general;
pub mod style;

// Re-export compact_str::CompactString for convenience
pub use compact_str::{format_compact, CompactString, ToCompactString};

// Re-export smallvec for stack-optimized collections
pub use smallvec::{smallvec, SmallVec};

// Re-export bitflags for flag types
pub use bitflags::bitflags;

// Re-export rustc-hash for fast hash maps/sets
pub use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};

// Re-export phf for compile-time perfect hash functions
pub use phf::{phf_map, phf_set, Map as PhfMap, Set as PhfSet};

// Re-export shared utilities
pub use dom_props::*;
pub use dom_tag_config::*;
pub use escape::*;
pub use general::*;
pub use style::*;
