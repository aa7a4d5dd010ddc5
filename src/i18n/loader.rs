//! Fetches one namespace's messages for one locale.

use crate::i18n::dictionary::Dictionary;
use crate::i18n::error::{I18nError, Result, SourceError};
use crate::i18n::platform::{Locator, Platform};
use crate::i18n::template::UrlTemplate;
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolves locators from a template and turns their contents into
/// dictionaries.
#[derive(Clone)]
pub struct MessageLoader {
    platform: Arc<dyn Platform>,
    template: UrlTemplate,
}

impl MessageLoader {
    pub fn new(platform: Arc<dyn Platform>, template: UrlTemplate) -> Self {
        Self { platform, template }
    }

    pub fn template(&self) -> &UrlTemplate {
        &self.template
    }

    /// Load the dictionary for a declared locale and namespace.
    ///
    /// # Arguments
    /// * `declared_locale` - The locale exactly as declared in the options
    /// * `namespace` - Namespace name, including `common`
    ///
    /// # Returns
    /// The parsed dictionary, or `I18nError::Load` wrapping the cause.
    pub async fn load(&self, declared_locale: &str, namespace: &str) -> Result<Dictionary> {
        let locator = self.template.resolve(declared_locale, namespace);
        debug!("Loading namespace '{}' from {}", namespace, locator);

        match self.fetch(&locator).await {
            Ok(dictionary) => Ok(dictionary),
            Err(source) => {
                warn!(
                    "Failed to load namespace '{}' for '{}': {}",
                    namespace, declared_locale, source
                );
                Err(I18nError::Load {
                    namespace: namespace.to_string(),
                    locale: declared_locale.to_string(),
                    locator,
                    source,
                })
            }
        }
    }

    async fn fetch(&self, locator: &str) -> Result<Dictionary, SourceError> {
        let body = match Locator::parse(locator)? {
            Locator::File(path) => self.platform.read_local(&path).await?,
            Locator::Remote(url) => {
                let response = self.platform.fetch_remote(&url).await?;
                if !response.is_success() {
                    return Err(SourceError::Status(response.status));
                }
                response.body
            }
        };

        Dictionary::from_json(&body)
    }
}

impl std::fmt::Debug for MessageLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageLoader")
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}
