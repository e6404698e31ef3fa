//! Runtime helpers.
//!
//! Compiled programs call into this module for everything that depends on
//! render values:
//!
//! - **attribute**: property-table driven attribute serialization
//! - **style**: inline style objects
//! - **spread**: spreads, dynamic attribute names, spread-guarded attributes
//! - **inject**: values in child position
//! - **dispatch**: component invocation
//! - **host**: elements rendered from props (form elements, element graph)
//! - **program**: program execution

pub mod attribute;
mod context;
mod dispatch;
mod host;
mod inject;
mod program;
mod spread;
pub mod style;

pub use attribute::render_attribute;
pub use context::RenderContext;
pub use style::serialize_style;

pub(crate) use inject::render_value;
