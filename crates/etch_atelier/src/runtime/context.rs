//! Render state.

use etch_carton::escape_html_into;
use etch_relief::{EtchError, Result};

use crate::component::Context;
use crate::engine::Engine;
use crate::options::RenderOptions;
use crate::template::Template;
use crate::value::Value;

/// State of one string render.
///
/// Components receive the context so they can build nested templates with
/// [`RenderContext::html`] and read context values with
/// [`RenderContext::use_context`].
pub struct RenderContext<'e> {
    engine: &'e Engine,
    options: RenderOptions,
    out: String,
    /// Last write was text, so the next text needs a separator
    previous_was_text: bool,
    root_marker_written: bool,
    /// Values of the `<select>` elements being rendered, innermost last
    select_values: Vec<Value>,
    /// Provided context values, innermost last
    providers: Vec<(Context, Value)>,
    depth: usize,
}

impl<'e> RenderContext<'e> {
    pub(crate) fn new(engine: &'e Engine, options: RenderOptions) -> Self {
        Self {
            engine,
            options,
            out: String::new(),
            previous_was_text: false,
            root_marker_written: false,
            select_values: Vec::new(),
            providers: Vec::new(),
            depth: 0,
        }
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }

    pub fn engine(&self) -> &'e Engine {
        self.engine
    }

    /// Bind a template to values. The result renders where it is returned or
    /// injected.
    pub fn html(&mut self, template: Template, values: Vec<Value>) -> Result<Value> {
        self.engine.html(template, values)
    }

    /// Build the element graph of a template.
    pub fn create_element(&mut self, template: Template, values: Vec<Value>) -> Result<Value> {
        self.engine.create_element(template, values)
    }

    /// Current value of `context`: the innermost provider's, or the default.
    pub fn use_context(&self, context: &Context) -> Value {
        self.providers
            .iter()
            .rev()
            .find(|(provided, _)| provided.ptr_eq(context))
            .map_or_else(|| context.default_value().clone(), |(_, value)| value.clone())
    }

    pub(crate) fn push_markup(&mut self, markup: &str) {
        if markup.is_empty() {
            return;
        }
        self.out.push_str(markup);
        self.previous_was_text = false;
    }

    /// Unescaped text.
    pub(crate) fn push_text(&mut self, text: &str) {
        self.text_separator();
        escape_html_into(&mut self.out, text);
    }

    /// Text escaped at compile time.
    pub(crate) fn push_escaped_text(&mut self, escaped: &str) {
        self.text_separator();
        self.out.push_str(escaped);
    }

    fn text_separator(&mut self) {
        if self.previous_was_text && !self.options.static_markup {
            self.out.push_str("<!-- -->");
        }
        self.previous_was_text = true;
    }

    /// Inner HTML and the leading newline of `<pre>` content.
    pub(crate) fn push_raw(&mut self, raw: &str) {
        self.out.push_str(raw);
        self.previous_was_text = false;
    }

    /// Buffer for attribute serializers, which write inside an open tag.
    pub(crate) fn attributes(&mut self) -> &mut String {
        &mut self.out
    }

    pub(crate) fn write_root_marker(&mut self) {
        if self.root_marker_written {
            return;
        }
        self.root_marker_written = true;
        if self.options.root_marker && !self.options.static_markup {
            self.out.push_str(" data-reactroot=\"\"");
        }
    }

    pub(crate) fn push_select_value(&mut self, value: Value) {
        self.select_values.push(value);
    }

    pub(crate) fn pop_select_value(&mut self) {
        self.select_values.pop();
    }

    pub(crate) fn select_value(&self) -> Option<&Value> {
        self.select_values.last()
    }

    pub(crate) fn push_provider(&mut self, context: Context, value: Value) {
        self.providers.push((context, value));
    }

    pub(crate) fn pop_provider(&mut self) {
        self.providers.pop();
    }

    pub(crate) fn enter(&mut self) -> Result<()> {
        if self.depth >= self.options.max_depth {
            return Err(EtchError::RecursionLimit {
                limit: self.options.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
