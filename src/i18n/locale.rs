//! Locale algebra: validation, likely-subtag maximization and comparison.
//!
//! Matching is lenient on input shape and strict on semantics. `fr`, `fr-FR`
//! and `fr-Latn-FR` all maximize to `fr-Latn-FR` and therefore match, while
//! `fr-Arab` maximizes to `fr-Arab-FR` and never matches Latin-script French.

use crate::i18n::error::{I18nError, Result};
use std::cmp::Ordering;
use unic_langid::subtags::Language;
use unic_langid::LanguageIdentifier;

/// Likely language for a tag whose language stays undetermined (`und`).
const UNDETERMINED_FALLBACK: &str = "en";

/// Parse a BCP 47 language tag.
///
/// The underlying parser also accepts `_` as a subtag separator, which is not
/// valid BCP 47, so underscores are rejected up front.
fn parse(tag: &str) -> Option<LanguageIdentifier> {
    if tag.is_empty() || tag.contains('_') {
        return None;
    }
    tag.parse::<LanguageIdentifier>().ok()
}

/// Check whether a string is a well-formed BCP 47 language tag.
///
/// # Example
/// ```
/// use i18n_engine::i18n::is_valid_locale;
///
/// assert!(is_valid_locale("fr-Latn-FR"));
/// assert!(!is_valid_locale("en_US"));
/// ```
pub fn is_valid_locale(tag: &str) -> bool {
    parse(tag).is_some()
}

/// Maximize a locale using CLDR "Add Likely Subtags".
///
/// Fills in the most likely script and region, producing
/// `language-Script-REGION` (variants are kept).
///
/// # Returns
/// * `Ok(String)` with the maximized tag
/// * `Err(I18nError::InvalidLocale)` if `tag` is not a valid locale
pub fn maximize_locale(tag: &str) -> Result<String> {
    let mut langid = parse(tag).ok_or_else(|| I18nError::InvalidLocale(tag.to_string()))?;
    langid.maximize();

    // Bare `und` has no likely-subtags entry in the parser's table.
    if langid.language.as_str() == "und" {
        langid.language = UNDETERMINED_FALLBACK
            .parse::<Language>()
            .map_err(|_| I18nError::InvalidLocale(tag.to_string()))?;
        langid.maximize();
    }

    Ok(langid.to_string())
}

/// Check whether a tag is already in its maximized form.
pub fn is_maximized_locale(tag: &str) -> bool {
    maximize_locale(tag).map(|max| max == tag).unwrap_or(false)
}

/// Check whether two tags are locale-equivalent (equal once maximized).
pub fn locales_match(a: &str, b: &str) -> bool {
    match (maximize_locale(a), maximize_locale(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Parse an HTTP `Accept-Language` header into tags ordered by preference.
///
/// Entries keep header order when weights tie. Wildcards, `q=0` entries and
/// invalid tags are dropped.
pub fn parse_accept_language(header: &str) -> Vec<String> {
    let mut weighted: Vec<(String, f32)> = header
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split(';');
            let tag = parts.next()?.trim();
            if tag.is_empty() || tag == "*" || !is_valid_locale(tag) {
                return None;
            }

            let mut weight = 1.0_f32;
            for param in parts {
                if let Some(q) = param.trim().strip_prefix("q=") {
                    weight = q.trim().parse().unwrap_or(0.0);
                }
            }

            (weight > 0.0).then(|| (tag.to_string(), weight))
        })
        .collect();

    // sort_by is stable, so equal weights keep header order
    weighted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    weighted.into_iter().map(|(tag, _)| tag).collect()
}
