use crate::i18n::I18nOptions;
use anyhow::{bail, Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Locales
    pub supported_locales: Vec<String>,
    pub default_locale: Option<String>,

    // Messages
    pub namespaces: Vec<String>,
    pub messages_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let supported_locales = split_list(
            &std::env::var("I18N_SUPPORTED_LOCALES").context("I18N_SUPPORTED_LOCALES not set")?,
        );
        if supported_locales.is_empty() {
            bail!("I18N_SUPPORTED_LOCALES must list at least one locale");
        }

        Ok(Self {
            supported_locales,
            default_locale: std::env::var("I18N_DEFAULT_LOCALE")
                .ok()
                .filter(|v| !v.trim().is_empty()),

            namespaces: std::env::var("I18N_NAMESPACES")
                .map(|v| split_list(&v))
                .unwrap_or_default(),
            messages_url: std::env::var("I18N_MESSAGES_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),
        })
    }

    /// Engine options for this configuration.
    pub fn options(&self) -> I18nOptions {
        let options = I18nOptions::new(self.supported_locales.clone())
            .with_namespaces(self.namespaces.clone());
        match &self.messages_url {
            Some(url) => options.with_url_template(url.clone()),
            None => options,
        }
    }
}

/// Split a comma-separated list, dropping blanks.
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
