//! The I18n engine: validated configuration, locale negotiation and
//! namespace loading.

use crate::i18n::cache::{CacheReport, MessageCache};
use crate::i18n::dictionary::Dictionary;
use crate::i18n::error::{I18nError, Result};
use crate::i18n::loader::MessageLoader;
use crate::i18n::locale::maximize_locale;
use crate::i18n::platform::{Environment, Platform};
use crate::i18n::registry::{LocaleEntry, LocaleRegistry};
use crate::i18n::template::UrlTemplate;
use crate::i18n::translator::{Translator, COMMON_NAMESPACE};
use futures::future::try_join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Engine configuration.
#[derive(Debug, Clone, Default)]
pub struct I18nOptions {
    /// Supported locales as declared, e.g. `["en", "fr", "fr-Arab"]`
    pub supported_locales: Vec<String>,

    /// Namespaces besides `common` that may be requested
    pub namespaces: Vec<String>,

    /// Messages URL template; the platform default when `None`
    pub url_template: Option<String>,
}

impl I18nOptions {
    pub fn new<I, S>(supported_locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            supported_locales: supported_locales.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_namespaces<I, S>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.namespaces = namespaces.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_url_template(mut self, template: impl Into<String>) -> Self {
        self.url_template = Some(template.into());
        self
    }
}

/// Arguments for [`I18n::load_messages`].
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Requested locale; auto-detected when `None`
    pub locale: Option<String>,

    /// Namespaces to load in addition to `common`
    pub namespaces: Vec<String>,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_namespaces<I, S>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.namespaces = namespaces.into_iter().map(Into::into).collect();
        self
    }
}

/// Resolves locales and namespaces into [`Translator`]s.
///
/// # Example
/// ```no_run
/// use i18n_engine::i18n::{I18n, I18nOptions, LoadOptions, NativePlatform};
/// use std::sync::Arc;
///
/// # async fn run() -> Result<(), i18n_engine::i18n::I18nError> {
/// let i18n = I18n::new(
///     I18nOptions::new(["en", "fr"])
///         .with_namespaces(["admin"])
///         .with_url_template("https://cdn.example.com/:locale/:namespace.json"),
///     Arc::new(NativePlatform::new()),
/// )?;
///
/// let t = i18n
///     .load_messages(LoadOptions::new().with_locale("fr-FR").with_namespaces(["admin"]))
///     .await?;
/// println!("{}", t.t_with("hello", &[("name", "Alice")])?);
/// # Ok(())
/// # }
/// ```
pub struct I18n {
    registry: LocaleRegistry,
    namespaces: Vec<String>,
    loader: MessageLoader,
    cache: MessageCache,
    platform: Arc<dyn Platform>,
}

impl I18n {
    /// Validate the options and build an engine.
    ///
    /// Fails on an empty or invalid locale list, a declared `common`
    /// namespace, or a URL template without `:locale` and `:namespace`.
    pub fn new(options: I18nOptions, platform: Arc<dyn Platform>) -> Result<Self> {
        let registry = LocaleRegistry::from_declared(options.supported_locales.as_slice())?;

        let mut namespaces: Vec<String> = Vec::with_capacity(options.namespaces.len());
        for namespace in options.namespaces {
            if namespace == COMMON_NAMESPACE {
                return Err(I18nError::ReservedNamespace);
            }
            if !namespaces.contains(&namespace) {
                namespaces.push(namespace);
            }
        }

        let template = UrlTemplate::parse(
            options
                .url_template
                .unwrap_or_else(|| platform.default_url_template()),
        )?;

        info!(
            "I18n engine ready: locales [{}], namespaces [{}], messages from {}",
            registry.list_maximized().join(", "),
            namespaces.join(", "),
            template
        );

        Ok(Self {
            registry,
            namespaces,
            loader: MessageLoader::new(Arc::clone(&platform), template),
            cache: MessageCache::new(),
            platform,
        })
    }

    /// All supported locales in maximized form, in declaration order.
    pub fn supported_locales(&self) -> Vec<String> {
        self.registry.list_maximized()
    }

    /// Check if a candidate maximizes to a supported locale.
    pub fn is_supported_locale(&self, candidate: &str) -> bool {
        self.registry.is_supported(candidate)
    }

    /// Supported locales with their declared forms.
    pub fn locale_entries(&self) -> &[LocaleEntry] {
        self.registry.entries()
    }

    /// Namespaces declared at construction, excluding `common`.
    pub fn declared_namespaces(&self) -> &[String] {
        &self.namespaces
    }

    pub fn url_template(&self) -> &UrlTemplate {
        self.loader.template()
    }

    pub fn cache_report(&self) -> CacheReport {
        self.cache.stats().report()
    }

    /// Resolve a locale, load `common` plus the requested namespaces and
    /// return a translator bound to them.
    ///
    /// Namespaces are fetched concurrently; the first failure fails the call.
    pub async fn load_messages(&self, options: LoadOptions) -> Result<Translator> {
        let requested = match options.locale {
            Some(locale) => locale,
            None => self.detect_locale()?,
        };

        let mut namespaces: Vec<String> = vec![COMMON_NAMESPACE.to_string()];
        let mut undeclared: Vec<String> = Vec::new();
        for namespace in options.namespaces {
            if namespace != COMMON_NAMESPACE && !self.namespaces.contains(&namespace) {
                if !undeclared.contains(&namespace) {
                    undeclared.push(namespace);
                }
            } else if !namespaces.contains(&namespace) {
                namespaces.push(namespace);
            }
        }
        if !undeclared.is_empty() {
            return Err(I18nError::UndeclaredNamespaces(undeclared));
        }

        let maximized = maximize_locale(&requested)?;
        let entry = self
            .registry
            .get_by_maximized(&maximized)
            .ok_or_else(|| I18nError::UnsupportedLocale {
                requested: requested.clone(),
                maximized: maximized.clone(),
            })?;

        let loaded = try_join_all(
            namespaces
                .iter()
                .map(|namespace| self.load_namespace(entry, namespace)),
        )
        .await?;

        info!(
            "Loaded namespaces [{}] for {} (requested as '{}')",
            namespaces.join(", "),
            entry.maximized,
            requested
        );

        Ok(Translator::new(
            entry.maximized.clone(),
            loaded.into_iter().collect::<HashMap<_, _>>(),
        ))
    }

    /// Pick a locale from the page language, then the preferred languages.
    fn detect_locale(&self) -> Result<String> {
        if self.platform.environment() != Environment::Browser {
            return Err(I18nError::AutoDetectUnavailable);
        }

        let document_language = self.platform.document_language();
        if let Some(language) = &document_language {
            if self.is_supported_locale(language) {
                debug!("Using document language '{}'", language);
                return Ok(language.clone());
            }
        }

        let preferred = self.platform.preferred_languages();
        if let Some(language) = preferred
            .iter()
            .find(|language| self.is_supported_locale(language))
        {
            debug!("Using preferred language '{}'", language);
            return Ok(language.clone());
        }

        Err(I18nError::NoDetectedLocale {
            candidates: document_language.into_iter().chain(preferred).collect(),
        })
    }

    async fn load_namespace(
        &self,
        entry: &LocaleEntry,
        namespace: &str,
    ) -> Result<(String, Arc<Dictionary>)> {
        if let Some(dictionary) = self.cache.get(&entry.maximized, namespace) {
            debug!("Cache hit for {}/{}", entry.maximized, namespace);
            return Ok((namespace.to_string(), dictionary));
        }

        self.cache.stats().record_fetch();
        match self.loader.load(&entry.declared, namespace).await {
            Ok(dictionary) => {
                let dictionary = self.cache.insert(&entry.maximized, namespace, dictionary);
                Ok((namespace.to_string(), dictionary))
            }
            Err(e) => {
                self.cache.stats().record_failure();
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for I18n {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18n")
            .field("registry", &self.registry)
            .field("namespaces", &self.namespaces)
            .field("loader", &self.loader)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::error::SourceError;
    use crate::i18n::platform::{BrowserContext, NativePlatform, RemoteResponse};
    use async_trait::async_trait;
    use std::path::Path;
    use std::sync::Mutex;
    use url::Url;

    /// In-memory platform that records every fetched locator.
    struct FakePlatform {
        files: HashMap<String, String>,
        requests: Mutex<Vec<String>>,
    }

    impl FakePlatform {
        fn new(files: &[(&str, &str)]) -> Arc<Self> {
            Arc::new(Self {
                files: files
                    .iter()
                    .map(|(path, body)| (path.to_string(), body.to_string()))
                    .collect(),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Platform for FakePlatform {
        async fn read_local(&self, path: &Path) -> std::result::Result<String, SourceError> {
            let key = path.display().to_string();
            self.requests.lock().unwrap().push(key.clone());
            self.files.get(&key).cloned().ok_or_else(|| SourceError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            })
        }

        async fn fetch_remote(&self, url: &Url) -> std::result::Result<RemoteResponse, SourceError> {
            self.requests.lock().unwrap().push(url.to_string());
            Ok(RemoteResponse {
                status: 404,
                body: String::new(),
            })
        }

        fn default_url_template(&self) -> String {
            "/msgs/:locale/:namespace.json".to_string()
        }
    }

    fn engine(platform: Arc<FakePlatform>) -> I18n {
        I18n::new(
            I18nOptions::new(["en", "fr", "fr-Arab"]).with_namespaces(["admin", "billing"]),
            platform,
        )
        .unwrap()
    }

    fn standard_files() -> Arc<FakePlatform> {
        FakePlatform::new(&[
            ("/msgs/en/common.json", r#"{"hello":"Hello, {{name}}!"}"#),
            ("/msgs/fr/common.json", r#"{"hello":"Bonjour, {{name}} !"}"#),
            ("/msgs/fr-Arab/common.json", r#"{"hello":"Bonjour (Arab)"}"#),
            ("/msgs/fr/admin.json", r#"{"title":"Administration"}"#),
        ])
    }

    // ==================== Construction Tests ====================

    #[test]
    fn test_new_rejects_declared_common() {
        let err = I18n::new(
            I18nOptions::new(["en"]).with_namespaces(["common"]),
            standard_files(),
        )
        .unwrap_err();
        assert!(matches!(err, I18nError::ReservedNamespace));
    }

    #[test]
    fn test_new_validates_explicit_template() {
        let err = I18n::new(
            I18nOptions::new(["en"]).with_url_template("/msgs/:locale.json"),
            standard_files(),
        )
        .unwrap_err();
        assert!(err.to_string().contains(":namespace"));
    }

    #[test]
    fn test_new_uses_platform_default_template() {
        let i18n = engine(standard_files());
        assert_eq!(i18n.url_template().as_str(), "/msgs/:locale/:namespace.json");
    }

    #[test]
    fn test_new_dedupes_namespaces() {
        let i18n = I18n::new(
            I18nOptions::new(["en"]).with_namespaces(["admin", "admin"]),
            standard_files(),
        )
        .unwrap();
        assert_eq!(i18n.declared_namespaces(), ["admin".to_string()]);
    }

    #[test]
    fn test_supported_locales() {
        let i18n = engine(standard_files());
        assert_eq!(
            i18n.supported_locales(),
            vec!["en-Latn-US", "fr-Latn-FR", "fr-Arab-FR"]
        );
        assert!(i18n.is_supported_locale("fr-FR"));
        assert!(!i18n.is_supported_locale("en-Arab"));
    }

    // ==================== load_messages Tests ====================

    #[tokio::test]
    async fn test_load_uses_declared_locale_in_locator() {
        let platform = standard_files();
        let i18n = engine(platform.clone());

        let t = i18n
            .load_messages(LoadOptions::new().with_locale("fr-FR"))
            .await
            .unwrap();
        assert_eq!(t.locale(), "fr-Latn-FR");
        assert_eq!(t.t_with("hello", &[("name", "Alice")]).unwrap(), "Bonjour, Alice !");
        assert_eq!(platform.requests(), vec!["/msgs/fr/common.json"]);
    }

    #[tokio::test]
    async fn test_load_requested_namespace() {
        let i18n = engine(standard_files());
        let t = i18n
            .load_messages(LoadOptions::new().with_locale("fr").with_namespaces(["admin"]))
            .await
            .unwrap();
        assert_eq!(t.t("admin:title").unwrap(), "Administration");
        assert_eq!(t.namespaces(), vec!["admin", "common"]);
    }

    #[tokio::test]
    async fn test_load_common_can_be_requested_explicitly() {
        let platform = standard_files();
        let i18n = engine(platform.clone());
        i18n.load_messages(LoadOptions::new().with_locale("en").with_namespaces(["common"]))
            .await
            .unwrap();
        assert_eq!(platform.requests(), vec!["/msgs/en/common.json"]);
    }

    #[tokio::test]
    async fn test_load_unsupported_locale_does_not_fall_back() {
        let i18n = engine(standard_files());
        let err = i18n
            .load_messages(LoadOptions::new().with_locale("en-Arab"))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "locale \"en-Arab-US\" (requested as \"en-Arab\") is not supported"
        );
    }

    #[tokio::test]
    async fn test_load_invalid_locale() {
        let i18n = engine(standard_files());
        let err = i18n
            .load_messages(LoadOptions::new().with_locale("en_US"))
            .await
            .unwrap_err();
        assert!(matches!(err, I18nError::InvalidLocale(_)));
    }

    #[tokio::test]
    async fn test_load_lists_every_undeclared_namespace() {
        let platform = standard_files();
        let i18n = engine(platform.clone());
        let err = i18n
            .load_messages(
                LoadOptions::new()
                    .with_locale("en")
                    .with_namespaces(["admin", "reports", "audit"]),
            )
            .await
            .unwrap_err();
        match &err {
            I18nError::UndeclaredNamespaces(names) => assert_eq!(names, &["reports", "audit"]),
            other => panic!("unexpected error: {}", other),
        }
        assert!(err.to_string().contains("\"reports\", \"audit\""));
        assert!(platform.requests().is_empty());
    }

    #[tokio::test]
    async fn test_load_second_call_hits_cache() {
        let platform = standard_files();
        let i18n = engine(platform.clone());

        for _ in 0..2 {
            i18n.load_messages(LoadOptions::new().with_locale("en"))
                .await
                .unwrap();
        }

        assert_eq!(platform.requests().len(), 1);
        let report = i18n.cache_report();
        assert_eq!(report.fetches, 1);
        assert_eq!(report.hits, 1);
    }

    #[tokio::test]
    async fn test_equivalent_locales_share_cache_entry() {
        let platform = standard_files();
        let i18n = engine(platform.clone());

        i18n.load_messages(LoadOptions::new().with_locale("fr"))
            .await
            .unwrap();
        i18n.load_messages(LoadOptions::new().with_locale("fr-Latn-FR"))
            .await
            .unwrap();

        assert_eq!(platform.requests(), vec!["/msgs/fr/common.json"]);
    }

    #[tokio::test]
    async fn test_failed_load_is_not_cached() {
        let platform = standard_files();
        let i18n = engine(platform.clone());

        for _ in 0..2 {
            let err = i18n
                .load_messages(LoadOptions::new().with_locale("en").with_namespaces(["billing"]))
                .await
                .unwrap_err();
            assert!(matches!(err, I18nError::Load { ref namespace, .. } if namespace == "billing"));
        }

        let billing_requests = platform
            .requests()
            .into_iter()
            .filter(|r| r.ends_with("billing.json"))
            .count();
        assert_eq!(billing_requests, 2);
        assert_eq!(i18n.cache_report().failures, 2);
    }

    // ==================== Auto-detection Tests ====================

    #[tokio::test]
    async fn test_autodetect_unavailable_on_server() {
        let i18n = engine(standard_files());
        let err = i18n.load_messages(LoadOptions::new()).await.unwrap_err();
        assert!(err
            .to_string()
            .contains("did you supply a locale argument?"));
    }

    #[tokio::test]
    async fn test_autodetect_browser_no_match() {
        let i18n = I18n::new(
            I18nOptions::new(["en"]).with_url_template("/msgs/:locale/:namespace.json"),
            Arc::new(NativePlatform::browser(
                BrowserContext::new("https://app.example.com")
                    .with_document_language("de")
                    .with_preferred_languages(["ja", "ko"]),
            )),
        )
        .unwrap();

        let err = i18n.load_messages(LoadOptions::new()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "unable to auto-detect locale: none of [\"de\", \"ja\", \"ko\"] is supported"
        );
    }
}
