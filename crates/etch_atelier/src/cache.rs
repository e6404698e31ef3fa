//! Template cache.
//!
//! Parsing and code generation happen once per template. The parsed tree and
//! the components it resolved are stored on the first use; the compiled form is
//! filled in on the first string render. Each entry is tied to the component
//! names its tree resolved, so re-registering a name drops exactly the entries
//! that depend on it.

use std::rc::Rc;

use compact_str::CompactString;
use etch_carton::{FxHashMap, FxHashSet};
use etch_relief::{Tag, Tree};
use once_cell::unsync::OnceCell;

use crate::codegen::{CompiledTemplate, ComponentTable};
use crate::registry::Registry;
use crate::template::TemplateId;

/// Cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub parses: usize,
    pub compiles: usize,
    pub invalidations: usize,
}

/// One cached template.
#[derive(Debug)]
pub struct CacheEntry {
    pub tree: Rc<Tree>,
    pub components: Rc<ComponentTable>,
    compiled: OnceCell<Rc<CompiledTemplate>>,
}

impl CacheEntry {
    /// Resolve the components of `tree` against `registry`.
    pub fn new(tree: Tree, registry: &Registry) -> Self {
        let components = resolve_components(&tree, registry);
        Self {
            tree: Rc::new(tree),
            components: Rc::new(components),
            compiled: OnceCell::new(),
        }
    }

    pub fn compiled(&self) -> Option<&Rc<CompiledTemplate>> {
        self.compiled.get()
    }

    pub(crate) fn set_compiled(&self, compiled: Rc<CompiledTemplate>) -> Rc<CompiledTemplate> {
        self.compiled.get_or_init(|| compiled).clone()
    }
}

/// Component handles for the component nodes of `tree`.
pub fn resolve_components(tree: &Tree, registry: &Registry) -> ComponentTable {
    tree.nodes
        .iter()
        .filter_map(|node| match &node.tag {
            Tag::Component(name) => registry.get(name).map(|c| (node.id, c.clone())),
            _ => None,
        })
        .collect()
}

#[derive(Debug, Default)]
pub struct TemplateCache {
    entries: FxHashMap<TemplateId, Rc<CacheEntry>>,
    /// Component name to the templates that resolved it
    ties: FxHashMap<CompactString, FxHashSet<TemplateId>>,
    stats: CacheStats,
}

impl TemplateCache {
    pub fn get(&mut self, id: TemplateId) -> Option<Rc<CacheEntry>> {
        let entry = self.entries.get(&id).cloned();
        if entry.is_some() {
            self.stats.hits += 1;
        }
        entry
    }

    pub fn insert(&mut self, id: TemplateId, entry: CacheEntry) -> Rc<CacheEntry> {
        for name in &entry.tree.ties {
            self.ties.entry(name.clone()).or_default().insert(id);
        }
        let entry = Rc::new(entry);
        self.entries.insert(id, entry.clone());
        self.stats.parses += 1;
        entry
    }

    pub fn remove(&mut self, id: TemplateId) -> Option<Rc<CacheEntry>> {
        let entry = self.entries.remove(&id)?;
        for name in &entry.tree.ties {
            if let Some(ids) = self.ties.get_mut(name) {
                ids.remove(&id);
            }
        }
        Some(entry)
    }

    /// Drop every entry tied to `name`. Returns how many were dropped.
    pub fn invalidate(&mut self, name: &str) -> usize {
        let Some(ids) = self.ties.remove(name) else {
            return 0;
        };
        let mut dropped = 0;
        for id in ids {
            if self.remove(id).is_some() {
                dropped += 1;
            }
        }
        if dropped > 0 {
            self.stats.invalidations += dropped;
            tracing::debug!(name, dropped, "invalidated cached templates");
        }
        dropped
    }

    pub(crate) fn record_compile(&mut self) {
        self.stats.compiles += 1;
    }

    pub fn contains(&self, id: TemplateId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.ties.clear();
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Component;
    use crate::template;
    use crate::value::Value;
    use etch_armature::parse;
    use etch_relief::ParserOptions;

    fn entry(registry: &Registry, fragments: &[&str]) -> CacheEntry {
        let tree = parse(registry, fragments, &ParserOptions::default()).unwrap();
        CacheEntry::new(tree, registry)
    }

    #[test]
    fn test_invalidate_by_tie() {
        let mut registry = Registry::new();
        registry
            .register("Card", Component::function(|_, _| Ok(Value::Null)))
            .unwrap();
        let with_card = template!["<Card/>"];
        let plain = template!["<p/>"];

        let mut cache = TemplateCache::default();
        cache.insert(with_card.id(), entry(&registry, with_card.fragments()));
        cache.insert(plain.id(), entry(&registry, plain.fragments()));
        assert_eq!(cache.len(), 2);

        assert_eq!(cache.invalidate("Card"), 1);
        assert!(!cache.contains(with_card.id()));
        assert!(cache.contains(plain.id()));
        assert_eq!(cache.invalidate("Card"), 0);
        assert_eq!(cache.stats().invalidations, 1);
    }

    #[test]
    fn test_unknown_capitalized_tags_are_tied() {
        let registry = Registry::new();
        let tpl = template!["<Later/>"];
        let mut cache = TemplateCache::default();
        cache.insert(tpl.id(), entry(&registry, tpl.fragments()));
        assert_eq!(cache.invalidate("Later"), 1);
    }

    #[test]
    fn test_components_are_resolved() {
        let mut registry = Registry::new();
        let card = Component::function(|_, _| Ok(Value::Null));
        registry.register("Card", card.clone()).unwrap();
        let entry = entry(&registry, &["<div><Card/></div>"]);
        assert_eq!(entry.components.len(), 1);
        assert!(entry.components.values().all(|c| c.ptr_eq(&card)));
        assert!(entry.compiled().is_none());
    }

    #[test]
    fn test_hits_are_counted() {
        let tpl = template!["<p/>"];
        let mut cache = TemplateCache::default();
        assert!(cache.get(tpl.id()).is_none());
        cache.insert(tpl.id(), entry(&Registry::new(), tpl.fragments()));
        assert!(cache.get(tpl.id()).is_some());
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                parses: 1,
                ..CacheStats::default()
            }
        );
    }
}
