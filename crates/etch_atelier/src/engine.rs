//! The render engine.

use std::cell::RefCell;
use std::rc::Rc;

use compact_str::CompactString;
use etch_armature::parse;
use etch_relief::{EtchError, Result, Tree};

use crate::cache::{CacheEntry, CacheStats, TemplateCache};
use crate::codegen::{generate, CompiledTemplate};
use crate::component::Component;
use crate::interpret;
use crate::markup::Markup;
use crate::options::{EtchOptions, RenderOptions};
use crate::plugins::Plugins;
use crate::registry::Registry;
use crate::runtime::{render_value, RenderContext};
use crate::template::Template;
use crate::value::Value;

/// Compiles templates on first use and renders them.
///
/// ```
/// use etch_atelier::{template, Engine, Value};
///
/// let engine = Engine::new();
/// let html = engine
///     .render_to_string(template!["<p>Hello, ", "!</p>"], vec![Value::from("Ada")])
///     .unwrap();
/// assert_eq!(html, r#"<p data-reactroot="">Hello, <!-- -->Ada<!-- -->!</p>"#);
/// ```
#[derive(Default)]
pub struct Engine {
    registry: Registry,
    cache: RefCell<TemplateCache>,
    plugins: Plugins,
    options: EtchOptions,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EtchOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &EtchOptions {
        &self.options
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn plugins_mut(&mut self) -> &mut Plugins {
        &mut self.plugins
    }

    /// Register components by name. Templates that resolved a name whose
    /// component changed are dropped from the cache.
    pub fn register<I, N>(&mut self, components: I) -> Result<()>
    where
        I: IntoIterator<Item = (N, Component)>,
        N: Into<CompactString>,
    {
        for (name, component) in components {
            let name = name.into();
            let kind = component.kind_name();
            if self.registry.register(name.clone(), component)? {
                let dropped = self.cache.get_mut().invalidate(&name);
                tracing::debug!(%name, kind, dropped, "registered component");
            }
        }
        Ok(())
    }

    fn entry(&self, template: Template) -> Result<Rc<CacheEntry>> {
        let id = template.id();
        let cached = self.cache.borrow_mut().get(id);
        if let Some(entry) = cached {
            return Ok(entry);
        }
        let tree = parse(&self.registry, template.fragments(), &self.options.parser)?;
        tracing::debug!(template = ?id, nodes = tree.nodes.len(), "template cache miss");
        let entry = CacheEntry::new(tree, &self.registry);
        Ok(self.cache.borrow_mut().insert(id, entry))
    }

    /// Parsed tree of a template.
    pub fn parse(&self, template: Template) -> Result<Rc<Tree>> {
        Ok(self.entry(template)?.tree.clone())
    }

    /// Compiled form of a template. A template whose code generation fails is
    /// evicted, so the next use reports the error again.
    pub fn compile(&self, template: Template) -> Result<Rc<CompiledTemplate>> {
        let entry = self.entry(template)?;
        if let Some(compiled) = entry.compiled() {
            return Ok(compiled.clone());
        }
        match generate(entry.tree.clone(), entry.components.clone()) {
            Ok(compiled) => {
                self.cache.borrow_mut().record_compile();
                Ok(entry.set_compiled(Rc::new(compiled)))
            }
            Err(err) => {
                self.cache.borrow_mut().remove(template.id());
                Err(err)
            }
        }
    }

    /// Bind values to a compiled template.
    pub(crate) fn markup(&self, template: Template, values: Vec<Value>) -> Result<Markup> {
        check_value_count(template.value_count(), values.len())?;
        Ok(Markup::new(self.compile(template)?, values))
    }

    /// Bind values to a template without rendering it. The result can be passed
    /// as a value to another template.
    pub fn html(&self, template: Template, values: Vec<Value>) -> Result<Value> {
        self.markup(template, values).map(Value::Markup)
    }

    pub fn render_to_string(&self, template: Template, values: Vec<Value>) -> Result<String> {
        self.render_template(template, values, self.options.render)
    }

    /// Plain HTML, without the root marker or text separators.
    pub fn render_to_static_markup(&self, template: Template, values: Vec<Value>) -> Result<String> {
        let options = RenderOptions {
            static_markup: true,
            ..self.options.render
        };
        self.render_template(template, values, options)
    }

    fn render_template(&self, template: Template, values: Vec<Value>, options: RenderOptions) -> Result<String> {
        let values = self.plugins.apply_pre(values);
        let markup = self.markup(template, values)?;
        tracing::trace!(template = ?template.id(), "render");
        self.render_value(&Value::Markup(markup), options)
    }

    /// Render any value as a root: an element from tree mode, bound markup, or
    /// plain text.
    pub fn render_element_to_string(&self, element: &Value) -> Result<String> {
        self.render_value(element, self.options.render)
    }

    pub fn render_element_to_static_markup(&self, element: &Value) -> Result<String> {
        let options = RenderOptions {
            static_markup: true,
            ..self.options.render
        };
        self.render_value(element, options)
    }

    fn render_value(&self, value: &Value, options: RenderOptions) -> Result<String> {
        let mut cx = RenderContext::new(self, options);
        render_value(&mut cx, value)?;
        Ok(self.plugins.apply_post(cx.finish()))
    }

    /// Element graph of a template with its values bound.
    pub fn create_element(&self, template: Template, values: Vec<Value>) -> Result<Value> {
        check_value_count(template.value_count(), values.len())?;
        let entry = self.entry(template)?;
        Ok(interpret::build(&entry.tree, &entry.components, &values))
    }

    /// Parse fragments that are not a static template. Nothing is cached.
    pub fn parse_fragments(&self, fragments: &[&str]) -> Result<Tree> {
        parse(&self.registry, fragments, &self.options.parser)
    }

    /// Render fragments that are not a static template. Nothing is cached.
    pub fn render_fragments(&self, fragments: &[&str], values: Vec<Value>) -> Result<String> {
        let values = self.plugins.apply_pre(values);
        check_value_count(fragments.len().saturating_sub(1), values.len())?;
        let entry = CacheEntry::new(self.parse_fragments(fragments)?, &self.registry);
        let compiled = generate(entry.tree.clone(), entry.components.clone())?;
        let markup = Markup::new(Rc::new(compiled), values);
        self.render_value(&Value::Markup(markup), self.options.render)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.borrow().stats()
    }

    /// Number of cached templates.
    pub fn cached_templates(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn clear_cache(&mut self) {
        self.cache.get_mut().clear();
    }
}

fn check_value_count(expected: usize, received: usize) -> Result<()> {
    if expected != received {
        return Err(EtchError::ValueCountMismatch { expected, received });
    }
    Ok(())
}
