//! Translation function bound to one locale and a set of loaded namespaces.

use crate::i18n::dictionary::{placeholder_regex, Dictionary};
use crate::i18n::error::{I18nError, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// The implicit namespace that is always loaded.
pub const COMMON_NAMESPACE: &str = "common";

/// Looks up and formats messages for a resolved locale.
///
/// Created by [`I18n::load_messages`](crate::i18n::I18n::load_messages).
/// Cheap to clone; the locale never changes.
#[derive(Debug, Clone)]
pub struct Translator {
    locale: String,
    dictionaries: HashMap<String, Arc<Dictionary>>,
}

impl Translator {
    pub(crate) fn new(locale: String, dictionaries: HashMap<String, Arc<Dictionary>>) -> Self {
        Self {
            locale,
            dictionaries,
        }
    }

    /// The maximized locale this translator resolves messages for.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Namespaces available to this translator, sorted.
    pub fn namespaces(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.dictionaries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// The loaded dictionary for a namespace.
    pub fn dictionary(&self, namespace: &str) -> Option<&Dictionary> {
        self.dictionaries.get(namespace).map(Arc::as_ref)
    }

    /// Translate a key that takes no substitutions.
    pub fn t(&self, key: &str) -> Result<String> {
        self.t_with::<&str, &str>(key, &[])
    }

    /// Translate a key and replace its `{{placeholder}}` tokens.
    ///
    /// # Arguments
    /// * `key` - `[namespace:]path.to.message`; no prefix means `common`
    /// * `substitutions` - `(name, value)` pairs for the placeholders
    ///
    /// # Example
    /// ```ignore
    /// let greeting = t.t_with("hello", &[("name", "Alice")])?;
    /// let title = t.t_with("admin:users.title", &[("count", "3")])?;
    /// ```
    pub fn t_with<K, V>(&self, key: &str, substitutions: &[(K, V)]) -> Result<String>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let (namespace, path) = parse_key(key)?;

        let dictionary = self.dictionaries.get(namespace).ok_or_else(|| {
            I18nError::NamespaceNotLoaded {
                namespace: namespace.to_string(),
                key: key.to_string(),
            }
        })?;

        let message = dictionary
            .lookup(path)
            .filter(|message| !message.is_empty())
            .ok_or_else(|| I18nError::MessageNotFound {
                key: key.to_string(),
                locale: self.locale.clone(),
            })?;

        substitute(key, message, substitutions)
    }
}

/// Split a key into namespace and dot path.
pub(crate) fn parse_key(key: &str) -> Result<(&str, &str)> {
    let (namespace, path) = match key.split_once(':') {
        Some((namespace, path)) => (namespace, path),
        None => (COMMON_NAMESPACE, key),
    };

    let well_formed = !namespace.is_empty()
        && !path.is_empty()
        && !path.contains(':')
        && path.split('.').all(|segment| !segment.is_empty());

    if !well_formed {
        return Err(I18nError::MalformedKey(key.to_string()));
    }
    Ok((namespace, path))
}

fn substitute<K, V>(key: &str, message: &str, substitutions: &[(K, V)]) -> Result<String>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let regex = placeholder_regex();
    let mut output = String::with_capacity(message.len());
    let mut last = 0;

    for cap in regex.captures_iter(message) {
        let (Some(token), Some(name)) = (cap.get(0), cap.get(1)) else {
            continue;
        };
        let value = substitutions
            .iter()
            .find(|(k, _)| k.as_ref() == name.as_str())
            .map(|(_, v)| v.as_ref())
            .ok_or_else(|| I18nError::MissingSubstitution {
                key: key.to_string(),
                placeholder: name.as_str().to_string(),
            })?;

        output.push_str(&message[last..token.start()]);
        output.push_str(value);
        last = token.end();
    }

    output.push_str(&message[last..]);
    Ok(output)
}
