//! Component registry.

use compact_str::CompactString;
use etch_armature::{Resolution, TagResolver};
use etch_carton::{is_pascal_case, FxHashMap};
use etch_relief::{EtchError, Result};

use crate::component::Component;

/// Names usable as component tags.
#[derive(Default, Clone)]
pub struct Registry {
    components: FxHashMap<CompactString, Component>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `component` under `name`.
    ///
    /// Returns whether the name now resolves differently than before, which is
    /// when templates that used it must be recompiled.
    pub fn register(&mut self, name: impl Into<CompactString>, component: Component) -> Result<bool> {
        let name = name.into();
        validate(&name, &component)?;
        let changed = self
            .components
            .get(&name)
            .map_or(true, |previous| !previous.ptr_eq(&component));
        self.components.insert(name, component);
        Ok(changed)
    }

    pub fn get(&self, name: &str) -> Option<&Component> {
        self.components.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.components.keys().map(|n| n.as_str()).collect();
        names.sort_unstable();
        names
    }
}

fn validate(name: &str, component: &Component) -> Result<()> {
    if !is_pascal_case(name) {
        return Err(EtchError::InvalidComponentName { name: name.into() });
    }
    if let Component::Alias(tag) = component {
        let mut chars = tag.chars();
        let valid = chars.next().is_some_and(|c| c.is_ascii_lowercase())
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !valid {
            return Err(EtchError::UnsupportedComponent {
                name: name.into(),
                reason: "an alias must name a lowercase host element",
            });
        }
    }
    Ok(())
}

impl TagResolver for Registry {
    fn resolve(&self, name: &str) -> Resolution {
        match self.components.get(name) {
            Some(Component::Alias(tag)) => Resolution::Alias(tag.clone()),
            Some(_) => Resolution::Component,
            None => Resolution::Unknown,
        }
    }

    fn same_component(&self, a: &str, b: &str) -> bool {
        match (self.components.get(a), self.components.get(b)) {
            (Some(x), Some(y)) => x.ptr_eq(y),
            _ => a == b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn test_register_reports_changes() {
        let mut registry = Registry::new();
        let card = Component::function(|_, _| Ok(Value::Null));
        assert!(registry.register("Card", card.clone()).unwrap());
        assert!(!registry.register("Card", card).unwrap());
        assert!(registry
            .register("Card", Component::function(|_, _| Ok(Value::Null)))
            .unwrap());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_rejects_lowercase_names() {
        let err = registry_error("card", Component::Fragment);
        assert_eq!(err, EtchError::InvalidComponentName { name: "card".into() });
        assert!(matches!(
            registry_error("Card", Component::alias("Section")),
            EtchError::UnsupportedComponent { .. }
        ));
        assert!(matches!(
            registry_error("Card", Component::alias("")),
            EtchError::UnsupportedComponent { .. }
        ));
    }

    fn registry_error(name: &str, component: Component) -> EtchError {
        Registry::new().register(name, component).unwrap_err()
    }

    #[test]
    fn test_resolution() {
        let mut registry = Registry::new();
        let card = Component::function(|_, _| Ok(Value::Null));
        registry.register("Card", card.clone()).unwrap();
        registry.register("Panel", card).unwrap();
        registry.register("Box", Component::alias("section")).unwrap();

        assert_eq!(registry.resolve("Card"), Resolution::Component);
        assert_eq!(registry.resolve("Box"), Resolution::Alias("section".into()));
        assert_eq!(registry.resolve("Other"), Resolution::Unknown);
        assert!(registry.same_component("Card", "Panel"));
        assert!(!registry.same_component("Card", "Box"));
        assert_eq!(registry.names(), ["Box", "Card", "Panel"]);
    }
}
