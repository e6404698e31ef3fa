//! Template identity.

use std::fmt;

/// A tagged template: its literal fragments, with one interpolation between
/// each adjacent pair.
///
/// Two [`Template`]s are the same template when they come from the same
/// [`template!`](crate::template!) invocation, so the compiled form can be cached
/// per call site. Build one with the macro:
///
/// ```
/// use etch_atelier::template;
///
/// let greeting = template!["<p>Hello, ", "!</p>"];
/// assert_eq!(greeting.value_count(), 1);
/// assert_eq!(greeting.id(), greeting.id());
/// ```
#[derive(Clone, Copy)]
pub struct Template {
    fragments: &'static &'static [&'static str],
}

/// Cache key of a [`Template`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateId(usize);

impl Template {
    /// Wrap the fragments stored in a `static`. The address of that static is the
    /// template's identity, which is why the macro is the usual way in.
    #[doc(hidden)]
    pub const fn from_static(fragments: &'static &'static [&'static str]) -> Self {
        Self { fragments }
    }

    pub fn id(&self) -> TemplateId {
        TemplateId(self.fragments as *const &'static [&'static str] as usize)
    }

    pub fn fragments(&self) -> &'static [&'static str] {
        self.fragments
    }

    /// Number of interpolations.
    pub fn value_count(&self) -> usize {
        self.fragments.len().saturating_sub(1)
    }
}

impl PartialEq for Template {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Template {}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Template").field(&self.fragments).finish()
    }
}

/// Declare a template from its literal fragments.
///
/// Each invocation site is a distinct template; evaluating the same site again
/// (in a loop, or in every call of a component) yields the same identity.
#[macro_export]
macro_rules! template {
    ($($fragment:expr),+ $(,)?) => {{
        static FRAGMENTS: &[&str] = &[$($fragment),+];
        $crate::Template::from_static(&FRAGMENTS)
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> Template {
        template!["<div>", "</div>"]
    }

    #[test]
    fn test_identity_is_per_call_site() {
        let a = template!["<p>", "</p>"];
        let b = template!["<p>", "</p>"];
        assert_ne!(a.id(), b.id());
        assert_eq!(card(), card());
    }

    #[test]
    fn test_value_count() {
        assert_eq!(template!["<br/>"].value_count(), 0);
        assert_eq!(template!["<a href=", ">", "</a>"].value_count(), 2);
    }
}
