//! Internationalization (i18n) message resolution.
//!
//! Maps a requested locale and set of namespaces to a [`Translator`], matching
//! locales by their maximized (likely-subtag) form and loading each namespace
//! lazily from a file or URL template.
//!
//! # Architecture
//!
//! - `locale`: BCP 47 validation and "Add Likely Subtags" maximization
//! - `dictionary`: nested message trees with dot-path lookup
//! - `template`: `:locale` / `:namespace` URL templates
//! - `platform`: injected host capabilities (file reads, HTTP, detection)
//! - `loader`: turns a locale and namespace into a dictionary
//! - `cache`: per-engine memoization and hit/miss statistics
//! - `registry`: maximized to declared locale mapping
//! - `engine`: the `I18n` engine
//! - `translator`: key lookup and placeholder substitution
//! - `validator`: cross-locale consistency checks
//!
//! # Example
//!
//! ```rust,ignore
//! use i18n_engine::i18n::{I18n, I18nOptions, LoadOptions, NativePlatform};
//!
//! let i18n = I18n::new(I18nOptions::new(["en", "fr"]), Arc::new(NativePlatform::new()))?;
//! let t = i18n.load_messages(LoadOptions::new().with_locale("fr-FR")).await?;
//! assert_eq!(t.locale(), "fr-Latn-FR");
//! ```

mod cache;
mod dictionary;
mod engine;
mod error;
mod loader;
mod locale;
mod platform;
mod registry;
mod template;
mod translator;
mod validator;

pub use cache::{CacheReport, CacheStats, MessageCache};
pub use dictionary::{is_dictionary, placeholders, Dictionary};
pub use engine::{I18n, I18nOptions, LoadOptions};
pub use error::{I18nError, SourceError};
pub use loader::MessageLoader;
pub use locale::{
    is_maximized_locale, is_valid_locale, locales_match, maximize_locale, parse_accept_language,
};
pub use platform::{
    BrowserContext, Environment, Locator, NativePlatform, Platform, RemoteResponse,
    DEFAULT_SERVER_TEMPLATE,
};
pub use registry::{LocaleEntry, LocaleRegistry};
pub use template::{UrlTemplate, LOCALE_TOKEN, NAMESPACE_TOKEN};
pub use translator::{Translator, COMMON_NAMESPACE};
pub use validator::{MessageValidator, ValidationReport};
