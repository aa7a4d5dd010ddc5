//! Nested message dictionaries for a single namespace.
//!
//! A dictionary is a JSON object whose values are either message strings or
//! further dictionaries. Messages are addressed with dot paths such as
//! `errors.network.timeout`.

use crate::i18n::error::SourceError;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::sync::OnceLock;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

/// Regex matching `{{name}}` tokens; group 1 is the trimmed placeholder name.
pub(crate) fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{\{\s*([^{}]+?)\s*\}\}").unwrap())
}

/// Check whether a JSON value can be used as a dictionary.
///
/// Only objects qualify; `null`, arrays, strings, numbers and booleans do not.
pub fn is_dictionary(value: &Value) -> bool {
    value.is_object()
}

/// Messages for one locale and namespace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    entries: Map<String, Value>,
}

impl Dictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON document into a dictionary.
    ///
    /// Fails if the text is not JSON or the top-level value is not an object.
    pub fn from_json(text: &str) -> Result<Self, SourceError> {
        let value: Value = serde_json::from_str(text)?;
        Self::try_from(value)
    }

    /// Look up a message by dot path.
    ///
    /// Returns `None` if any segment is missing or the path ends on a nested
    /// dictionary or a non-string value.
    pub fn lookup(&self, dot_path: &str) -> Option<&str> {
        let mut segments = dot_path.split('.');
        let first = segments.next()?;
        let mut current = self.entries.get(first)?;

        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }

        current.as_str()
    }

    /// All dot paths that resolve to a message, sorted.
    pub fn key_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        collect_paths(&self.entries, "", &mut paths);
        paths.sort();
        paths
    }

    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<Value> for Dictionary {
    type Error = SourceError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(entries) => Ok(Self { entries }),
            other => Err(SourceError::NotADictionary(other.to_string())),
        }
    }
}

/// Names of the `{{placeholder}}` tokens in a message, deduplicated.
pub fn placeholders(message: &str) -> BTreeSet<String> {
    placeholder_regex()
        .captures_iter(message)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

fn collect_paths(entries: &Map<String, Value>, prefix: &str, out: &mut Vec<String>) {
    for (key, value) in entries {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            Value::String(_) => out.push(path),
            Value::Object(nested) => collect_paths(nested, &path, out),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Dictionary {
        Dictionary::try_from(json!({
            "hello": "Hello, {{name}}!",
            "errors": {
                "network": {
                    "timeout": "The request timed out"
                },
                "count": 3
            }
        }))
        .unwrap()
    }

    // ==================== is_dictionary Tests ====================

    #[test]
    fn test_is_dictionary() {
        assert!(is_dictionary(&json!({})));
        assert!(is_dictionary(&json!({"a": "b"})));
        assert!(!is_dictionary(&json!(null)));
        assert!(!is_dictionary(&json!(["a"])));
        assert!(!is_dictionary(&json!("a")));
        assert!(!is_dictionary(&json!(42)));
    }

    // ==================== Construction Tests ====================

    #[test]
    fn test_try_from_rejects_array_with_payload() {
        let err = Dictionary::try_from(json!(["hello"])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "expected a JSON object of messages, got [\"hello\"]"
        );
    }

    #[test]
    fn test_from_json_invalid() {
        let err = Dictionary::from_json("{not json").unwrap_err();
        assert!(matches!(err, SourceError::Json(_)));
    }

    #[test]
    fn test_from_json_null_is_rejected() {
        let err = Dictionary::from_json("null").unwrap_err();
        assert!(matches!(err, SourceError::NotADictionary(ref p) if p == "null"));
    }

    // ==================== Lookup Tests ====================

    #[test]
    fn test_lookup_top_level() {
        assert_eq!(sample().lookup("hello"), Some("Hello, {{name}}!"));
    }

    #[test]
    fn test_lookup_nested() {
        assert_eq!(
            sample().lookup("errors.network.timeout"),
            Some("The request timed out")
        );
    }

    #[test]
    fn test_lookup_intermediate_is_not_found() {
        assert_eq!(sample().lookup("errors.network"), None);
    }

    #[test]
    fn test_lookup_missing_segment() {
        assert_eq!(sample().lookup("errors.disk.full"), None);
        assert_eq!(sample().lookup("hello.world"), None);
    }

    #[test]
    fn test_lookup_non_string_leaf() {
        assert_eq!(sample().lookup("errors.count"), None);
    }

    // ==================== Key Path Tests ====================

    #[test]
    fn test_key_paths() {
        assert_eq!(
            sample().key_paths(),
            vec!["errors.network.timeout".to_string(), "hello".to_string()]
        );
    }

    #[test]
    fn test_placeholders() {
        let names = placeholders("{{a}} and {{ b }} and {{a}}");
        assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_placeholders_with_dots_and_spaces() {
        let names = placeholders("Hi {{user.name}}, {{ first name }}");
        assert_eq!(
            names.into_iter().collect::<Vec<_>>(),
            vec!["first name", "user.name"]
        );
    }
}
