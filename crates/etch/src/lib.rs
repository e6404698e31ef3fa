//! # Etch
//!
//! Tagged template markup compiler and server renderer written in Rust.
//!
//! This crate re-exports all Etch sub-crates for unified documentation, and
//! holds the pieces of the command line tool that are worth testing on their
//! own: template files and the config file.
//!
//! ## Crates
//!
//! - [`carton`] - Lookup tables and string helpers
//! - [`relief`] - Template tree, errors and parser options
//! - [`armature`] - Template scanner and parser
//! - [`atelier`] - Compiler, renderer and element graphs

/// Lookup tables and string helpers.
pub use etch_carton as carton;

/// Template tree, errors and parser options.
pub use etch_relief as relief;

/// Template scanner and parser.
pub use etch_armature as armature;

/// Compiler, renderer and element graphs.
pub use etch_atelier as atelier;

pub mod config;
pub mod error;
pub mod source;

pub use error::{CliError, CliResult};
