//! Cross-locale consistency checks for message dictionaries.
//!
//! Compares a candidate locale's dictionary against a reference locale's
//! dictionary for the same namespace: every reference key should exist in the
//! candidate and use the same placeholders.

use crate::i18n::dictionary::{placeholders, Dictionary};
use std::collections::BTreeSet;

/// Validation report containing errors and warnings about a dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that make lookups fail at runtime
    pub errors: Vec<String>,

    /// Suspicious but harmless differences
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for cross-locale dictionary consistency.
pub struct MessageValidator;

impl MessageValidator {
    /// Validate a candidate dictionary against a reference dictionary.
    ///
    /// This function checks that:
    /// - every reference key exists in the candidate (error)
    /// - shared keys use the same placeholder names (error)
    /// - the candidate has no keys the reference lacks (warning)
    pub fn validate(reference: &Dictionary, candidate: &Dictionary) -> ValidationReport {
        let mut report = ValidationReport::new();

        let reference_keys: BTreeSet<String> = reference.key_paths().into_iter().collect();
        let candidate_keys: BTreeSet<String> = candidate.key_paths().into_iter().collect();

        for key in reference_keys.difference(&candidate_keys) {
            report.errors.push(format!("Missing key: {}", key));
        }

        for key in reference_keys.intersection(&candidate_keys) {
            let (Some(expected), Some(actual)) = (reference.lookup(key), candidate.lookup(key))
            else {
                continue;
            };
            let expected = placeholders(expected);
            let actual = placeholders(actual);
            if expected != actual {
                report.errors.push(format!(
                    "Placeholder mismatch in {}: reference has {:?}, candidate has {:?}",
                    key, expected, actual
                ));
            }
        }

        for key in candidate_keys.difference(&reference_keys) {
            report.warnings.push(format!("Extra key: {}", key));
        }

        report
    }
}
