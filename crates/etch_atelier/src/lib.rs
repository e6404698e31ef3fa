//! Atelier - The template compiler and server renderer for Etch.
//!
//! ## Name Origin
//!
//! An **atelier** is the workshop where plates are inked and printed.
//! `etch_atelier` is where templates become output: it compiles parsed trees into
//! programs of static strings and runtime helpers, caches them per template, and
//! runs them to produce HTML. The same templates can also be turned into an
//! element graph instead of a string.
//!
//! ## Example
//!
//! ```
//! use etch_atelier::{template, Component, Engine, Value};
//!
//! let mut engine = Engine::new();
//! engine
//!     .register([(
//!         "Greeting",
//!         Component::function(|props, cx| {
//!             let name = props.get("name").cloned().unwrap_or_default();
//!             cx.html(template!["<b>Hello ", "</b>"], vec![name])
//!         }),
//!     )])
//!     .unwrap();
//!
//! let html = engine
//!     .render_to_string(template!["<div><Greeting name=", "/></div>"], vec!["Ada".into()])
//!     .unwrap();
//! assert_eq!(html, r#"<div data-reactroot=""><b>Hello <!-- -->Ada</b></div>"#);
//! ```

pub mod cache;
pub mod codegen;
pub mod component;
pub mod element;
pub mod engine;
pub mod interpret;
pub mod markup;
pub mod merge;
pub mod options;
pub mod plugins;
pub mod registry;
pub mod runtime;
pub mod template;
pub mod value;

pub use cache::{CacheStats, TemplateCache};
pub use codegen::{CompiledTemplate, Helper, Program};
pub use component::{ClassComponent, Component, ComponentInstance, Context};
pub use element::{Element, ElementKind};
pub use engine::Engine;
pub use markup::Markup;
pub use options::{EtchOptions, RenderOptions};
pub use plugins::Plugins;
pub use registry::Registry;
pub use runtime::RenderContext;
pub use template::{Template, TemplateId};
pub use value::{Callback, Props, Value};

pub use compact_str::CompactString;
pub use etch_relief::{ErrorKind, EtchError, Result};
