use std::time::Duration;

use thiserror::Error;

const DEFAULT_MODEL: &str = "gemini-1.5-pro";
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:3001";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Required environment variable '{key}' is not set")]
    Missing { key: String },

    #[error("Environment variable '{key}' is invalid: {message}")]
    Invalid { key: String, message: String },
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub llm_timeout: Duration,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub rust_log: String,
    /// Presence flags reported by `/health`; no client is built from them.
    pub openai_configured: bool,
    pub supabase_configured: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. `from_env` passes the
    /// process environment; tests pass a fixed table.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout_secs = match get("LLM_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::Invalid {
                    key: "LLM_TIMEOUT_SECS".to_string(),
                    message: format!("expected a positive number of seconds, got '{raw}'"),
                })?,
            None => 120,
        };

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                key: "PORT".to_string(),
                message: e.to_string(),
            })?,
            None => 8000,
        };

        Ok(Config {
            gemini_api_key: get("GEMINI_API_KEY").ok_or_else(|| ConfigError::Missing {
                key: "GEMINI_API_KEY".to_string(),
            })?,
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_api_base: get("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
                .trim_end_matches('/')
                .to_string(),
            llm_timeout: Duration::from_secs(timeout_secs),
            port,
            cors_origins: parse_origins(
                &get("CORS_ORIGINS").unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string()),
            ),
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            openai_configured: get("OPENAI_API_KEY").is_some(),
            supabase_configured: get("SUPABASE_URL").is_some(),
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let table: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| table.get(key).cloned()
    }

    #[test]
    fn test_missing_api_key_fails_fast() {
        let err = Config::from_lookup(lookup(&[("PORT", "9000")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Missing {
                key: "GEMINI_API_KEY".to_string()
            }
        );
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let err = Config::from_lookup(lookup(&[("GEMINI_API_KEY", "   ")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { .. }));
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_lookup(lookup(&[("GEMINI_API_KEY", "k")])).unwrap();
        assert_eq!(config.gemini_model, "gemini-1.5-pro");
        assert_eq!(config.port, 8000);
        assert_eq!(config.llm_timeout, Duration::from_secs(120));
        assert_eq!(
            config.cors_origins,
            vec!["http://localhost:3000", "http://localhost:3001"]
        );
        assert!(!config.openai_configured);
        assert!(!config.supabase_configured);
    }

    #[test]
    fn test_invalid_port_rejected() {
        let err = Config::from_lookup(lookup(&[("GEMINI_API_KEY", "k"), ("PORT", "http")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "PORT"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = Config::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "k"),
            ("LLM_TIMEOUT_SECS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "LLM_TIMEOUT_SECS"));
    }

    #[test]
    fn test_overrides_and_presence_flags() {
        let config = Config::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "k"),
            ("GEMINI_MODEL", "gemini-1.5-flash"),
            ("GEMINI_API_BASE", "http://localhost:9999/v1beta/"),
            ("CORS_ORIGINS", "https://app.example.com, ,http://localhost:3000"),
            ("SUPABASE_URL", "https://project.supabase.co"),
        ]))
        .unwrap();
        assert_eq!(config.gemini_model, "gemini-1.5-flash");
        assert_eq!(config.gemini_api_base, "http://localhost:9999/v1beta");
        assert_eq!(
            config.cors_origins,
            vec!["https://app.example.com", "http://localhost:3000"]
        );
        assert!(config.supabase_configured);
    }
}
