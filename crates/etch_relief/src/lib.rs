//! Relief - The template tree for Etch.
//!
//! ## Name Origin
//!
//! **Relief** is the raised image left on an etched plate once the ground has been
//! bitten away: the structure everything else is printed from. `etch_relief` holds
//! that structure for templates, the [`Tree`] the parser builds and the compiler and
//! renderer consume, together with the shared error type and parser options.

pub mod ast;
pub mod errors;
pub mod options;

pub use ast::*;
pub use errors::*;
pub use options::*;
