//! Error types for locale negotiation, message loading and lookup.
//!
//! Every failure carries a human-readable message. Batch validations
//! (invalid locales, undeclared namespaces) list every offending item.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the engine and its translators.
#[derive(Debug, Error)]
pub enum I18nError {
    // ==================== Configuration ====================
    #[error("at least one supported locale is required")]
    NoSupportedLocales,

    #[error("invalid supported locale(s): {}", quote_list(.0))]
    InvalidLocales(Vec<String>),

    #[error("namespace \"common\" is always loaded and must not be declared")]
    ReservedNamespace,

    #[error(
        "messages URL template \"{template}\" is missing required placeholder(s): {}",
        .missing.join(", ")
    )]
    MissingPlaceholders {
        template: String,
        missing: Vec<&'static str>,
    },

    // ==================== Request validation ====================
    #[error("invalid locale \"{0}\"")]
    InvalidLocale(String),

    #[error(
        "unable to auto-detect locale outside of a browser environment; \
         did you supply a locale argument?"
    )]
    AutoDetectUnavailable,

    #[error("unable to auto-detect locale: none of [{}] is supported", quote_list(.candidates))]
    NoDetectedLocale { candidates: Vec<String> },

    #[error(
        "namespace(s) {} were not declared when the engine was constructed",
        quote_list(.0)
    )]
    UndeclaredNamespaces(Vec<String>),

    #[error("locale \"{maximized}\" (requested as \"{requested}\") is not supported")]
    UnsupportedLocale { requested: String, maximized: String },

    #[error("malformed message key \"{0}\"; expected [namespace:]path.to.message")]
    MalformedKey(String),

    #[error("namespace \"{namespace}\" was not loaded for this translator (key \"{key}\")")]
    NamespaceNotLoaded { namespace: String, key: String },

    #[error("message \"{key}\" not found for locale \"{locale}\"; typo in key selector?")]
    MessageNotFound { key: String, locale: String },

    #[error("missing substitution for placeholder \"{{{{{placeholder}}}}}\" in message \"{key}\"")]
    MissingSubstitution { key: String, placeholder: String },

    // ==================== Transport ====================
    #[error("failed to load namespace \"{namespace}\" for locale \"{locale}\" from {locator}: {source}")]
    Load {
        namespace: String,
        locale: String,
        locator: String,
        #[source]
        source: SourceError,
    },
}

/// Failures while reading or decoding a single message resource.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("invalid resource locator \"{locator}\": {reason}")]
    InvalidLocator { locator: String, reason: String },

    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request returned status {0}")]
    Status(u16),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object of messages, got {0}")]
    NotADictionary(String),
}

pub type Result<T, E = I18nError> = std::result::Result<T, E>;

fn quote_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("\"{}\"", item))
        .collect::<Vec<_>>()
        .join(", ")
}
