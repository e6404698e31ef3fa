//! Render plugins.
//!
//! A `pre` plugin sees the values of a top-level render before they are bound
//! to the template. A `post` plugin sees the finished markup. Plugins run in
//! registration order.

use crate::value::Value;

type PrePlugin = Box<dyn Fn(Vec<Value>) -> Vec<Value>>;
type PostPlugin = Box<dyn Fn(String) -> String>;

#[derive(Default)]
pub struct Plugins {
    pre: Vec<PrePlugin>,
    post: Vec<PostPlugin>,
}

impl Plugins {
    pub fn pre<F>(&mut self, plugin: F) -> &mut Self
    where
        F: Fn(Vec<Value>) -> Vec<Value> + 'static,
    {
        self.pre.push(Box::new(plugin));
        self
    }

    pub fn post<F>(&mut self, plugin: F) -> &mut Self
    where
        F: Fn(String) -> String + 'static,
    {
        self.post.push(Box::new(plugin));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pre.is_empty() && self.post.is_empty()
    }

    pub(crate) fn apply_pre(&self, values: Vec<Value>) -> Vec<Value> {
        self.pre.iter().fold(values, |values, plugin| plugin(values))
    }

    pub(crate) fn apply_post(&self, markup: String) -> String {
        self.post.iter().fold(markup, |markup, plugin| plugin(markup))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugins_run_in_order() {
        let mut plugins = Plugins::default();
        plugins
            .post(|html| format!("{html}!"))
            .post(|html| html.to_uppercase());
        assert_eq!(plugins.apply_post("ok".into()), "OK!");
        assert!(!plugins.is_empty());
    }

    #[test]
    fn test_pre_rewrites_values() {
        let mut plugins = Plugins::default();
        plugins.pre(|mut values| {
            values.push(Value::from("extra"));
            values
        });
        assert_eq!(plugins.apply_pre(Vec::new()), vec![Value::from("extra")]);
    }
}
