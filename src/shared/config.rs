use crate::shared::errors::{AppError, AppResult};
use std::env;
use std::time::Duration;

const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-5-nano";
const DEFAULT_JOB_TIMEOUT_SECS: u64 = 120;
const DEFAULT_WORKER_POLL_SECS: u64 = 5;

/// Runtime configuration, read once at startup from the environment
/// (`.env` is loaded first via dotenvy).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub tmdb_api_key: String,
    pub tmdb_base_url: String,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub openai_model: String,
    /// Maximum wall-clock duration for a single recommendation job.
    pub job_timeout: Duration,
    /// Idle sleep between queue polls.
    pub worker_poll_interval: Duration,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            database_url: required_var("DATABASE_URL")?,
            tmdb_api_key: required_var("TMDB_API_KEY")?,
            tmdb_base_url: env::var("TMDB_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_TMDB_BASE_URL.to_string()),
            openai_api_key: required_var("OPENAI_API_KEY")?,
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string()),
            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string()),
            job_timeout: duration_var("JOB_TIMEOUT_SECS", DEFAULT_JOB_TIMEOUT_SECS)?,
            worker_poll_interval: duration_var("WORKER_POLL_SECS", DEFAULT_WORKER_POLL_SECS)?,
        })
    }
}

fn required_var(name: &str) -> AppResult<String> {
    let value = env::var(name)
        .map_err(|_| AppError::InvalidInput(format!("{} environment variable not found", name)))?;
    if value.trim().is_empty() {
        return Err(AppError::InvalidInput(format!("{} must not be empty", name)));
    }
    Ok(value)
}

fn duration_var(name: &str, default_secs: u64) -> AppResult<Duration> {
    match env::var(name) {
        Ok(raw) => {
            let secs: u64 = raw.parse().map_err(|_| {
                AppError::InvalidInput(format!("{} must be a positive integer, got '{}'", name, raw))
            })?;
            if secs == 0 {
                return Err(AppError::InvalidInput(format!("{} must be at least 1", name)));
            }
            Ok(Duration::from_secs(secs))
        }
        Err(_) => Ok(Duration::from_secs(default_secs)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_var_uses_default_when_unset() {
        let d = duration_var("CINEREC_TEST_UNSET_DURATION", 42).unwrap();
        assert_eq!(d, Duration::from_secs(42));
    }

    #[test]
    fn required_var_rejects_missing() {
        let err = required_var("CINEREC_TEST_UNSET_REQUIRED").unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
