use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_MODEL;
use crate::matching::MatchingConfig;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub groq_model: String,
    pub llm_temperature: f32,
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    pub request_timeout: Duration,
    pub matching: MatchingConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = MatchingConfig::default();
        let matching = MatchingConfig {
            jd_skill_threshold: parse_env("MATCH_JD_THRESHOLD", defaults.jd_skill_threshold)?,
            resume_match_threshold: parse_env(
                "MATCH_RESUME_THRESHOLD",
                defaults.resume_match_threshold,
            )?,
            chunk_size: parse_env("MATCH_CHUNK_SIZE", defaults.chunk_size)?,
            chunk_overlap: parse_env("MATCH_CHUNK_OVERLAP", defaults.chunk_overlap)?,
            top_k: parse_env("MATCH_TOP_K", defaults.top_k)?,
            min_gap: parse_env("MATCH_MIN_GAP", defaults.min_gap)?,
        };
        validate_matching(&matching)?;

        Ok(Config {
            groq_api_key: require_env("GROQ_API_KEY")?,
            groq_model: std::env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            llm_temperature: parse_env("LLM_TEMPERATURE", 0.3)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            request_timeout: Duration::from_secs(parse_env("REQUEST_TIMEOUT_SECS", 180)?),
            matching,
        })
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Config {
            groq_api_key: "test-key".to_string(),
            groq_model: DEFAULT_MODEL.to_string(),
            llm_temperature: 0.3,
            port: 0,
            rust_log: "debug".to_string(),
            max_upload_bytes: 1024 * 1024,
            request_timeout: Duration::from_secs(5),
            matching: MatchingConfig::default(),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Reads an optional variable, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn validate_matching(matching: &MatchingConfig) -> Result<()> {
    if matching.jd_skill_threshold > 100 || matching.resume_match_threshold > 100 {
        anyhow::bail!("Match thresholds must be between 0 and 100");
    }
    if matching.chunk_size == 0 {
        anyhow::bail!("MATCH_CHUNK_SIZE must be positive");
    }
    if matching.chunk_overlap >= matching.chunk_size {
        anyhow::bail!("MATCH_CHUNK_OVERLAP must be smaller than MATCH_CHUNK_SIZE");
    }
    if matching.top_k == 0 {
        anyhow::bail!("MATCH_TOP_K must be positive");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matching_config_is_valid() {
        assert!(validate_matching(&MatchingConfig::default()).is_ok());
    }

    #[test]
    fn test_overlap_must_be_smaller_than_chunk() {
        let matching = MatchingConfig {
            chunk_size: 200,
            chunk_overlap: 200,
            ..MatchingConfig::default()
        };
        assert!(validate_matching(&matching).is_err());
    }

    #[test]
    fn test_threshold_out_of_range() {
        let matching = MatchingConfig {
            resume_match_threshold: 101,
            ..MatchingConfig::default()
        };
        assert!(validate_matching(&matching).is_err());
    }

    #[test]
    fn test_parse_env_default_when_unset() {
        let value: u32 = parse_env("TAILOR_TEST_SURELY_UNSET_VAR", 42).unwrap();
        assert_eq!(value, 42);
    }
}
