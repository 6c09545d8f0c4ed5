//! Environment-driven configuration shared by the catalog crates.
//!
//! Every setting comes from a process environment variable. An empty value
//! counts as unset.

pub mod server;
pub mod tracing;

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Environment variable '{key}' has invalid value '{value}': {details}")]
    ParseError {
        key: String,
        value: String,
        details: String,
    },
}

/// Application environment.
///
/// Development mode exposes diagnostic detail (error details, span traces)
/// in HTTP error responses and must be opted into with
/// `APP_ENV=development`. Anything else runs as production.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        match env_var("APP_ENV") {
            Some(value) if value.eq_ignore_ascii_case("development") => Environment::Development,
            _ => Environment::Production,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// Configuration loadable from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Value of `key`, or `None` when unset or empty.
pub fn env_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env_var(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Parse `key` into `T`, falling back to `default` when unset.
pub fn env_parse_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match env_var(key) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: e.to_string(),
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_unset_is_production() {
        temp_env::with_var_unset("APP_ENV", || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Production);
            assert!(env.is_production());
            assert!(!env.is_development());
        });
    }

    #[test]
    fn test_environment_development_opt_in() {
        temp_env::with_var("APP_ENV", Some("development"), || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Development);
            assert!(env.is_development());
        });
    }

    #[test]
    fn test_environment_development_case_insensitive() {
        temp_env::with_var("APP_ENV", Some("Development"), || {
            assert_eq!(Environment::from_env(), Environment::Development);
        });
    }

    #[test]
    fn test_environment_unknown_is_production() {
        for value in ["staging", "dev", ""] {
            temp_env::with_var("APP_ENV", Some(value), || {
                assert_eq!(Environment::from_env(), Environment::Production);
            });
        }
    }

    #[test]
    fn test_empty_value_counts_as_unset() {
        temp_env::with_var("CATALOG_EMPTY", Some(""), || {
            assert_eq!(env_var("CATALOG_EMPTY"), None);
            assert!(matches!(
                env_required("CATALOG_EMPTY"),
                Err(ConfigError::MissingEnvVar(_))
            ));
            assert_eq!(env_parse_or("CATALOG_EMPTY", 7u32).unwrap(), 7);
        });
    }

    #[test]
    fn test_env_parse_or_reads_value() {
        temp_env::with_var("CATALOG_POOL", Some("25"), || {
            assert_eq!(env_parse_or("CATALOG_POOL", 10u32).unwrap(), 25);
        });
    }

    #[test]
    fn test_env_parse_or_reports_key_and_value() {
        temp_env::with_var("CATALOG_POOL", Some("lots"), || {
            let err = env_parse_or("CATALOG_POOL", 10u32).unwrap_err();
            assert!(matches!(
                err,
                ConfigError::ParseError { ref key, ref value, .. }
                    if key == "CATALOG_POOL" && value == "lots"
            ));
        });
    }
}
