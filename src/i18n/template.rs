//! Resource locator templates with `:locale` and `:namespace` placeholders.

use crate::i18n::error::{I18nError, Result};
use std::fmt;

/// Placeholder replaced by the declared locale string.
pub const LOCALE_TOKEN: &str = ":locale";

/// Placeholder replaced by the namespace name.
pub const NAMESPACE_TOKEN: &str = ":namespace";

/// A validated messages URL template, e.g.
/// `https://cdn.example.com/i18n/:locale/:namespace.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    template: String,
}

impl UrlTemplate {
    /// Validate a template.
    ///
    /// # Returns
    /// * `Ok(UrlTemplate)` if both placeholders are present
    /// * `Err(I18nError::MissingPlaceholders)` naming each missing token
    pub fn parse(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        let missing: Vec<&'static str> = [LOCALE_TOKEN, NAMESPACE_TOKEN]
            .into_iter()
            .filter(|token| !template.contains(token))
            .collect();

        if !missing.is_empty() {
            return Err(I18nError::MissingPlaceholders { template, missing });
        }

        Ok(Self { template })
    }

    /// Substitute the declared locale and namespace into the template.
    pub fn resolve(&self, declared_locale: &str, namespace: &str) -> String {
        self.template
            .replace(LOCALE_TOKEN, declared_locale)
            .replace(NAMESPACE_TOKEN, namespace)
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }
}

impl fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let template = UrlTemplate::parse("https://cdn.example.com/:locale/:namespace.json").unwrap();
        assert_eq!(template.as_str(), "https://cdn.example.com/:locale/:namespace.json");
    }

    #[test]
    fn test_parse_missing_locale() {
        let err = UrlTemplate::parse("/messages/:namespace.json").unwrap_err();
        match err {
            I18nError::MissingPlaceholders { missing, .. } => assert_eq!(missing, vec![":locale"]),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_parse_missing_namespace() {
        let err = UrlTemplate::parse("/messages/:locale.json").unwrap_err();
        match err {
            I18nError::MissingPlaceholders { missing, .. } => {
                assert_eq!(missing, vec![":namespace"])
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_parse_missing_both() {
        let err = UrlTemplate::parse("/messages/all.json").unwrap_err();
        assert_eq!(
            err.to_string(),
            "messages URL template \"/messages/all.json\" is missing required placeholder(s): :locale, :namespace"
        );
    }

    #[test]
    fn test_resolve() {
        let template = UrlTemplate::parse("http://localhost:8080/:locale/:namespace.json").unwrap();
        assert_eq!(
            template.resolve("fr-Arab", "common"),
            "http://localhost:8080/fr-Arab/common.json"
        );
    }

    #[test]
    fn test_resolve_replaces_every_occurrence() {
        let template = UrlTemplate::parse("/:locale/:namespace/:locale-:namespace.json").unwrap();
        assert_eq!(template.resolve("en", "admin"), "/en/admin/en-admin.json");
    }

    #[test]
    fn test_resolve_namespace_containing_locale_token() {
        let template = UrlTemplate::parse("/:locale/:namespace.json").unwrap();
        assert_eq!(
            template.resolve("en", "reports:locale"),
            "/en/reports:locale.json"
        );
    }
}
