//! Template files.
//!
//! A template file is markup with `${...}` placeholders, read the way a tagged
//! template literal is. Splitting it yields the literal fragments (one more than
//! there are placeholders) and the text inside each placeholder, which names the
//! value to bind or spells it out as JSON.

use etch_atelier::Value;
use serde_json::Value as Json;

use crate::error::{CliError, CliResult};

/// A template file split into fragments and placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSource {
    pub fragments: Vec<String>,
    pub placeholders: Vec<String>,
}

impl TemplateSource {
    /// Split `source` at its placeholders. `\$` keeps a literal dollar sign.
    pub fn parse(source: &str) -> CliResult<Self> {
        let bytes = source.as_bytes();
        let mut fragments = Vec::new();
        let mut placeholders = Vec::new();
        let mut current = String::new();
        let mut start = 0;
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'\\' if bytes.get(i + 1) == Some(&b'$') => {
                    current.push_str(&source[start..i]);
                    start = i + 1;
                    i += 2;
                }
                b'$' if bytes.get(i + 1) == Some(&b'{') => {
                    current.push_str(&source[start..i]);
                    let end = closing_brace(bytes, i + 2)
                        .ok_or(CliError::UnterminatedPlaceholder { offset: i })?;
                    fragments.push(std::mem::take(&mut current));
                    placeholders.push(source[i + 2..end].trim().to_string());
                    i = end + 1;
                    start = i;
                }
                _ => i += 1,
            }
        }
        current.push_str(&source[start..]);
        fragments.push(current);

        Ok(Self {
            fragments,
            placeholders,
        })
    }

    pub fn fragments(&self) -> Vec<&str> {
        self.fragments.iter().map(String::as_str).collect()
    }

    /// Values for the placeholders.
    ///
    /// An array binds by position. An object binds by placeholder text, and a
    /// placeholder it does not name must be a JSON literal, as must every
    /// placeholder when there are no values at all.
    pub fn bind(&self, values: Option<Json>) -> CliResult<Vec<Value>> {
        match values {
            Some(Json::Array(items)) => {
                if items.len() != self.placeholders.len() {
                    return Err(CliError::ValueCount {
                        expected: self.placeholders.len(),
                        received: items.len(),
                    });
                }
                Ok(items.into_iter().map(Value::from).collect())
            }
            Some(Json::Object(named)) => self
                .placeholders
                .iter()
                .map(|name| match named.get(name) {
                    Some(value) => Ok(Value::from(value.clone())),
                    None => literal(name),
                })
                .collect(),
            Some(single) => self.bind(Some(Json::Array(vec![single]))),
            None => self.placeholders.iter().map(|p| literal(p)).collect(),
        }
    }
}

fn literal(placeholder: &str) -> CliResult<Value> {
    if placeholder == "undefined" {
        return Ok(Value::Undefined);
    }
    serde_json::from_str::<Json>(placeholder)
        .map(Value::from)
        .map_err(|_| CliError::MissingValue {
            name: placeholder.to_string(),
        })
}

/// Index of the `}` closing a placeholder whose body starts at `from`. Nested
/// braces and quoted strings are skipped.
fn closing_brace(bytes: &[u8], from: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' if depth == 0 => return Some(i),
            b'}' => depth -= 1,
            quote @ (b'"' | b'\'') => {
                i += 1;
                while i < bytes.len() && bytes[i] != quote {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_split() {
        let source = TemplateSource::parse("<p class=${cls}>Hi ${ name }!</p>").unwrap();
        assert_eq!(source.fragments(), vec!["<p class=", ">Hi ", "!</p>"]);
        assert_eq!(source.placeholders, vec!["cls", "name"]);
    }

    #[test]
    fn test_nested_braces_and_strings() {
        let source = TemplateSource::parse(r#"<div ...${{"a": "}"}}></div>"#).unwrap();
        assert_eq!(source.fragments(), vec!["<div ...", "></div>"]);
        assert_eq!(source.placeholders, vec![r#"{"a": "}"}"#]);
    }

    #[test]
    fn test_escaped_dollar() {
        let source = TemplateSource::parse(r"<p>\${price}</p>").unwrap();
        assert_eq!(source.fragments(), vec!["<p>${price}</p>"]);
        assert!(source.placeholders.is_empty());
    }

    #[test]
    fn test_unterminated() {
        let err = TemplateSource::parse("<p>${oops</p>").unwrap_err();
        assert!(matches!(err, CliError::UnterminatedPlaceholder { offset: 3 }));
    }

    #[test]
    fn test_bind_positional() {
        let source = TemplateSource::parse("${a}${b}").unwrap();
        let values = source.bind(Some(json!(["x", 1]))).unwrap();
        assert_eq!(values, vec![Value::from("x"), Value::from(1)]);
        let err = source.bind(Some(json!(["x"]))).unwrap_err();
        assert!(matches!(
            err,
            CliError::ValueCount {
                expected: 2,
                received: 1
            }
        ));
    }

    #[test]
    fn test_bind_named_and_literals() {
        let source = TemplateSource::parse(r#"${name}${"lit"}${3}${undefined}"#).unwrap();
        let values = source.bind(Some(json!({ "name": "Ada" }))).unwrap();
        assert_eq!(
            values,
            vec![
                Value::from("Ada"),
                Value::from("lit"),
                Value::from(3),
                Value::Undefined
            ]
        );
        let err = source.bind(None).unwrap_err();
        assert_eq!(err.to_string(), "No value for placeholder `${name}`");
    }
}
