//! The host capabilities the engine depends on.
//!
//! Everything environment-specific (reading files, HTTP fetches, locale
//! detection, the default messages location) goes through [`Platform`], so an
//! engine has no hidden global coupling and tests can inject a fake.

use crate::i18n::error::SourceError;
use crate::i18n::locale::parse_accept_language;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// Kind of host the engine runs in. Only browser-like hosts can auto-detect
/// the locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Server,
    Browser,
}

/// Status and body of a remote fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteResponse {
    pub status: u16,
    pub body: String,
}

impl RemoteResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A resolved resource locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// `file:` URLs and plain paths
    File(PathBuf),
    /// Any other URL scheme
    Remote(Url),
}

impl Locator {
    /// Classify a resolved locator string by scheme.
    pub fn parse(locator: &str) -> Result<Self, SourceError> {
        match Url::parse(locator) {
            Ok(url) if url.scheme() == "file" => {
                url.to_file_path()
                    .map(Locator::File)
                    .map_err(|_| SourceError::InvalidLocator {
                        locator: locator.to_string(),
                        reason: "file URL does not name a local path".to_string(),
                    })
            }
            Ok(url) => Ok(Locator::Remote(url)),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Ok(Locator::File(PathBuf::from(locator)))
            }
            Err(e) => Err(SourceError::InvalidLocator {
                locator: locator.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

/// Host capabilities consumed by the engine.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Read a local resource as UTF-8 text.
    async fn read_local(&self, path: &Path) -> Result<String, SourceError>;

    /// Fetch a remote resource. Non-success statuses are returned, not raised.
    async fn fetch_remote(&self, url: &Url) -> Result<RemoteResponse, SourceError>;

    fn environment(&self) -> Environment {
        Environment::Server
    }

    /// Language declared by the page being served, if any.
    fn document_language(&self) -> Option<String> {
        None
    }

    /// User-preferred languages, most preferred first.
    fn preferred_languages(&self) -> Vec<String> {
        Vec::new()
    }

    /// Messages URL template used when the options do not supply one.
    fn default_url_template(&self) -> String;
}

/// Page-level locale hints for a browser-like request.
#[derive(Debug, Clone, Default)]
pub struct BrowserContext {
    /// Origin the page was served from, e.g. `https://app.example.com`
    pub origin: String,
    /// Language declared by the page (the document's `lang` attribute)
    pub document_language: Option<String>,
    /// Preferred languages, most preferred first
    pub preferred_languages: Vec<String>,
}

impl BrowserContext {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            ..Default::default()
        }
    }

    pub fn with_document_language(mut self, language: impl Into<String>) -> Self {
        self.document_language = Some(language.into());
        self
    }

    pub fn with_preferred_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferred_languages = languages.into_iter().map(Into::into).collect();
        self
    }

    /// Take preferred languages from an `Accept-Language` header.
    pub fn with_accept_language(mut self, header: &str) -> Self {
        self.preferred_languages = parse_accept_language(header);
        self
    }
}

/// Default template for server hosts, relative to the working directory.
pub const DEFAULT_SERVER_TEMPLATE: &str = "locales/:locale/:namespace.json";

/// Platform backed by `tokio::fs` and `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct NativePlatform {
    client: reqwest::Client,
    browser: Option<BrowserContext>,
}

impl NativePlatform {
    /// A server platform: no locale auto-detection.
    pub fn new() -> Self {
        Self::default()
    }

    /// A platform that behaves like a browser for the given page context.
    pub fn browser(context: BrowserContext) -> Self {
        Self {
            client: reqwest::Client::new(),
            browser: Some(context),
        }
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }
}

#[async_trait]
impl Platform for NativePlatform {
    async fn read_local(&self, path: &Path) -> Result<String, SourceError> {
        debug!("Reading messages from {}", path.display());
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SourceError::Io {
                path: path.to_path_buf(),
                source,
            })
    }

    async fn fetch_remote(&self, url: &Url) -> Result<RemoteResponse, SourceError> {
        debug!("Fetching messages from {}", url);
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RemoteResponse { status, body })
    }

    fn environment(&self) -> Environment {
        if self.browser.is_some() {
            Environment::Browser
        } else {
            Environment::Server
        }
    }

    fn document_language(&self) -> Option<String> {
        self.browser
            .as_ref()
            .and_then(|ctx| ctx.document_language.clone())
    }

    fn preferred_languages(&self) -> Vec<String> {
        self.browser
            .as_ref()
            .map(|ctx| ctx.preferred_languages.clone())
            .unwrap_or_default()
    }

    fn default_url_template(&self) -> String {
        match &self.browser {
            Some(ctx) => format!(
                "{}/locales/:locale/:namespace.json",
                ctx.origin.trim_end_matches('/')
            ),
            None => DEFAULT_SERVER_TEMPLATE.to_string(),
        }
    }
}
