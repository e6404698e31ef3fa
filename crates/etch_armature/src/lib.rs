//! Armature - The template scanner and parser for Etch.
//!
//! ## Name Origin
//!
//! An **armature** is the framework a sculptor builds before any material goes on.
//! `etch_armature` builds that framework for templates: it scans the literal
//! fragments of a tagged template, decides what every interpolation stands for,
//! and assembles the [`Tree`](etch_relief::Tree) the compiler works from.
//!
//! ## Example
//!
//! ```
//! use etch_armature::parse;
//! use etch_relief::{Child, ParserOptions};
//!
//! let tree = parse(&(), &["<p>Hello, ", "!</p>"], &ParserOptions::default()).unwrap();
//! assert_eq!(tree.value_count(), 1);
//! assert_eq!(tree.nodes[0].children[1], Child::Slot(0));
//! ```

pub mod parser;
pub mod text;
pub mod tokenizer;

pub use parser::{parse, Parser, Resolution, TagResolver};
pub use tokenizer::{Callbacks, Tokenizer};
