//! Supported locale registry.
//!
//! Maps each maximized locale to the string it was declared as. The maximized
//! form is the lookup key; the declared form builds resource locators.

use crate::i18n::error::{I18nError, Result};
use crate::i18n::locale::{is_valid_locale, maximize_locale};
use tracing::warn;

/// One supported locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleEntry {
    /// Maximized form, e.g. "fr-Latn-FR"
    pub maximized: String,

    /// Form given in the options, e.g. "fr"
    pub declared: String,
}

/// Supported locales in declaration order.
#[derive(Debug, Clone)]
pub struct LocaleRegistry {
    entries: Vec<LocaleEntry>,
}

impl LocaleRegistry {
    /// Build the registry from declared locales.
    ///
    /// # Returns
    /// * `Err(I18nError::NoSupportedLocales)` if `declared` is empty
    /// * `Err(I18nError::InvalidLocales)` listing every invalid entry
    ///
    /// When two declarations maximize to the same locale the later one wins,
    /// keeping the position of the first.
    pub fn from_declared<S: AsRef<str>>(declared: &[S]) -> Result<Self> {
        if declared.is_empty() {
            return Err(I18nError::NoSupportedLocales);
        }

        let invalid: Vec<String> = declared
            .iter()
            .map(AsRef::as_ref)
            .filter(|tag| !is_valid_locale(tag))
            .map(str::to_string)
            .collect();
        if !invalid.is_empty() {
            return Err(I18nError::InvalidLocales(invalid));
        }

        let mut entries: Vec<LocaleEntry> = Vec::with_capacity(declared.len());
        for tag in declared.iter().map(AsRef::as_ref) {
            let maximized = maximize_locale(tag)?;
            match entries.iter_mut().find(|entry| entry.maximized == maximized) {
                Some(existing) => {
                    warn!(
                        "Locales '{}' and '{}' both maximize to '{}'; using '{}'",
                        existing.declared, tag, maximized, tag
                    );
                    existing.declared = tag.to_string();
                }
                None => entries.push(LocaleEntry {
                    maximized,
                    declared: tag.to_string(),
                }),
            }
        }

        Ok(Self { entries })
    }

    /// Get an entry by its maximized form.
    pub fn get_by_maximized(&self, maximized: &str) -> Option<&LocaleEntry> {
        self.entries.iter().find(|entry| entry.maximized == maximized)
    }

    /// Maximize a candidate and look it up. Invalid candidates match nothing.
    pub fn resolve(&self, candidate: &str) -> Option<&LocaleEntry> {
        let maximized = maximize_locale(candidate).ok()?;
        self.get_by_maximized(&maximized)
    }

    /// Check if a candidate locale matches a supported locale.
    pub fn is_supported(&self, candidate: &str) -> bool {
        self.resolve(candidate).is_some()
    }

    /// Maximized forms in declaration order.
    pub fn list_maximized(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.maximized.clone()).collect()
    }

    pub fn entries(&self) -> &[LocaleEntry] {
        &self.entries
    }
}
