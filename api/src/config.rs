use std::env;
use std::time::Duration;

use anyhow::Context;

const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_AI_TIMEOUT_SECS: u64 = 15;
const DEFAULT_PORT: u16 = 5000;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    /// Gemini API key; without it AI suggestions are skipped
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_api_url: String,
    pub ai_timeout: Duration,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            gemini_api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_api_url: env::var("GEMINI_API_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_API_URL.to_string()),
            ai_timeout: Duration::from_secs(parse_or(
                "AI_TIMEOUT_SECS",
                env::var("AI_TIMEOUT_SECS").ok(),
                DEFAULT_AI_TIMEOUT_SECS,
            )?),
            port: parse_or("PORT", env::var("PORT").ok(), DEFAULT_PORT)?,
        })
    }
}

/// Parse an optional variable, falling back to `default` when unset
fn parse_or<T>(name: &str, raw: Option<String>, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {}", name, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_or_uses_default_when_unset() {
        assert_eq!(parse_or("PORT", None, 5000u16).unwrap(), 5000);
    }

    #[test]
    fn parse_or_reads_value() {
        assert_eq!(parse_or("PORT", Some(" 8080 ".to_string()), 5000u16).unwrap(), 8080);
    }

    #[test]
    fn parse_or_rejects_invalid_value() {
        let err = parse_or("AI_TIMEOUT_SECS", Some("soon".to_string()), 15u64).unwrap_err();
        assert!(err.to_string().contains("AI_TIMEOUT_SECS"));
    }
}
