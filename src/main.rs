//! Command-line access to the i18n engine.
//!
//! Usage:
//!   i18n-engine translate hello --locale fr --arg name=Alice
//!   i18n-engine translate admin:users.title --locale en --arg count=3
//!   i18n-engine keys --locale en --namespace admin
//!   i18n-engine check --reference en --namespace admin
//!   i18n-engine locales
//!
//! Required environment variables:
//! - I18N_SUPPORTED_LOCALES (comma-separated)
//!
//! Optional:
//! - I18N_NAMESPACES (comma-separated)
//! - I18N_MESSAGES_URL (defaults to locales/:locale/:namespace.json)
//! - I18N_DEFAULT_LOCALE

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use i18n_engine::config::Config;
use i18n_engine::i18n::{I18n, LoadOptions, MessageValidator, NativePlatform, COMMON_NAMESPACE};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "i18n-engine", version, about = "Resolve and inspect translation messages")]
struct Cli {
    /// Messages URL template (overrides I18N_MESSAGES_URL)
    #[arg(long, global = true)]
    messages_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Translate a key
    Translate {
        /// Key as [namespace:]path.to.message
        key: String,

        /// Locale to translate into (defaults to I18N_DEFAULT_LOCALE)
        #[arg(long)]
        locale: Option<String>,

        /// Additional namespaces to load
        #[arg(long = "namespace")]
        namespaces: Vec<String>,

        /// Placeholder substitution as name=value
        #[arg(long = "arg", value_parser = parse_substitution)]
        args: Vec<(String, String)>,
    },

    /// List the key selectors available for a locale
    Keys {
        #[arg(long)]
        locale: Option<String>,

        #[arg(long = "namespace")]
        namespaces: Vec<String>,
    },

    /// Check every supported locale against a reference locale
    Check {
        /// Reference locale
        #[arg(long)]
        reference: String,

        /// Namespaces to check (defaults to all declared)
        #[arg(long = "namespace")]
        namespaces: Vec<String>,
    },

    /// Print supported locales with their maximized forms
    Locales,
}

fn parse_substitution(value: &str) -> Result<(String, String), String> {
    value
        .split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected name=value, got '{}'", value))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("i18n_engine=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(url) = cli.messages_url {
        config.messages_url = Some(url);
    }

    let i18n = I18n::new(config.options(), Arc::new(NativePlatform::new()))
        .context("Invalid i18n configuration")?;

    match cli.command {
        Command::Translate {
            key,
            locale,
            mut namespaces,
            args,
        } => {
            if let Some((namespace, _)) = key.split_once(':') {
                if namespace != COMMON_NAMESPACE && !namespaces.iter().any(|n| n == namespace) {
                    namespaces.push(namespace.to_string());
                }
            }

            let t = i18n
                .load_messages(load_options(&config, locale, namespaces))
                .await?;
            println!("{}", t.t_with(&key, args.as_slice())?);
        }
        Command::Keys { locale, namespaces } => {
            let t = i18n
                .load_messages(load_options(&config, locale, namespaces))
                .await?;
            for namespace in t.namespaces() {
                let Some(dictionary) = t.dictionary(namespace) else {
                    continue;
                };
                for path in dictionary.key_paths() {
                    if namespace == COMMON_NAMESPACE {
                        println!("{}", path);
                    } else {
                        println!("{}:{}", namespace, path);
                    }
                }
            }
        }
        Command::Check {
            reference,
            namespaces,
        } => {
            let namespaces = if namespaces.is_empty() {
                i18n.declared_namespaces().to_vec()
            } else {
                namespaces
            };
            let failures = check_locales(&i18n, &reference, namespaces).await?;
            if failures > 0 {
                bail!("{} locale(s) failed the consistency check", failures);
            }
            info!("All locales are consistent with {}", reference);
        }
        Command::Locales => {
            for entry in i18n.locale_entries() {
                println!("{}\t{}", entry.declared, entry.maximized);
            }
        }
    }

    info!("{}", i18n.cache_report());
    Ok(())
}

fn load_options(config: &Config, locale: Option<String>, namespaces: Vec<String>) -> LoadOptions {
    let options = LoadOptions::new().with_namespaces(namespaces);
    match locale.or_else(|| config.default_locale.clone()) {
        Some(locale) => options.with_locale(locale),
        None => options,
    }
}

/// Validate every supported locale against the reference, returning the
/// number of locales with errors.
async fn check_locales(i18n: &I18n, reference: &str, namespaces: Vec<String>) -> Result<usize> {
    let reference_t = i18n
        .load_messages(
            LoadOptions::new()
                .with_locale(reference)
                .with_namespaces(namespaces.clone()),
        )
        .await?;

    let mut failures = 0;
    for entry in i18n.locale_entries() {
        if entry.maximized == reference_t.locale() {
            continue;
        }

        let candidate_t = i18n
            .load_messages(
                LoadOptions::new()
                    .with_locale(entry.maximized.clone())
                    .with_namespaces(namespaces.clone()),
            )
            .await?;

        let mut has_errors = false;
        for namespace in reference_t.namespaces() {
            let (Some(expected), Some(actual)) = (
                reference_t.dictionary(namespace),
                candidate_t.dictionary(namespace),
            ) else {
                return Err(anyhow!("namespace '{}' was not loaded", namespace));
            };

            let report = MessageValidator::validate(expected, actual);
            for error in &report.errors {
                println!("{} [{}] error: {}", entry.declared, namespace, error);
            }
            for warning in &report.warnings {
                warn!("{} [{}] {}", entry.declared, namespace, warning);
            }
            has_errors |= report.has_errors();
        }

        if has_errors {
            failures += 1;
        }
    }

    Ok(failures)
}
