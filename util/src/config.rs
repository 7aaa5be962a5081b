//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from environment variables. It provides
//! thread-safe access and mutation for testing or overrides in runtime environments.

use std::env;
use std::sync::{OnceLock, RwLock};

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub host: String,
    pub port: u16,
    /// Base URL of the Piston-compatible runner, without the `/api/v2/...` suffix.
    pub runner_url: String,
    pub problem_bank_path: String,
    /// Optional path to a `GradingConfig` JSON document. Empty means defaults.
    pub grading_config_path: String,
    /// Minimum word-level similarity for a fuzzy problem match (0.0–1.0).
    pub fuzzy_match_threshold: f64,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Unparseable numeric values fall back to their defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: env::var("APP_ENV").unwrap_or_else(|_| "development".into()),
            project_name: env::var("PROJECT_NAME").unwrap_or_else(|_| "code-grader".into()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "api=info,grader=info".into()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "api.log".into()),
            log_to_stdout: env::var("LOG_TO_STDOUT").unwrap_or_else(|_| "false".into()) == "true",
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            runner_url: env::var("RUNNER_URL")
                .unwrap_or_else(|_| "https://emkc.org".into())
                .trim_end_matches('/')
                .to_string(),
            problem_bank_path: env::var("PROBLEM_BANK_PATH")
                .unwrap_or_else(|_| "data/problems.json".into()),
            grading_config_path: env::var("GRADING_CONFIG_PATH").unwrap_or_default(),
            fuzzy_match_threshold: env::var("FUZZY_MATCH_THRESHOLD")
                .ok()
                .and_then(|t| t.parse::<f64>().ok())
                .filter(|t| (0.0..=1.0).contains(t))
                .unwrap_or(0.6),
        }
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// # Panics
    /// Panics if the lock cannot be acquired.
    pub fn global() -> std::sync::RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Useful in tests to clear overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            let mut guard = lock
                .write()
                .expect("Failed to acquire AppConfig write lock");
            *guard = AppConfig::from_env();
        }
    }

    /// Generic internal setter for any field in the config.
    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        let mut guard = lock
            .write()
            .expect("Failed to acquire AppConfig write lock");
        setter(&mut guard);
    }

    /// Overrides the runner URL until the next [`AppConfig::reset`].
    pub fn set_runner_url(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.runner_url = value.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "PORT",
            "RUNNER_URL",
            "FUZZY_MATCH_THRESHOLD",
            "LOG_TO_STDOUT",
            "GRADING_CONFIG_PATH",
        ] {
            unsafe {
                env::remove_var(key);
            }
        }
    }

    #[test]
    #[serial]
    fn defaults_apply_when_env_is_empty() {
        clear_env();
        let cfg = AppConfig::from_env();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.runner_url, "https://emkc.org");
        assert_eq!(cfg.fuzzy_match_threshold, 0.6);
        assert!(!cfg.log_to_stdout);
        assert!(cfg.grading_config_path.is_empty());
    }

    #[test]
    #[serial]
    fn env_values_override_defaults() {
        clear_env();
        unsafe {
            env::set_var("PORT", "8088");
            env::set_var("RUNNER_URL", "http://localhost:2000/");
            env::set_var("FUZZY_MATCH_THRESHOLD", "0.75");
            env::set_var("LOG_TO_STDOUT", "true");
        }
        let cfg = AppConfig::from_env();
        assert_eq!(cfg.port, 8088);
        assert_eq!(cfg.runner_url, "http://localhost:2000");
        assert_eq!(cfg.fuzzy_match_threshold, 0.75);
        assert!(cfg.log_to_stdout);
        clear_env();
    }

    #[test]
    #[serial]
    fn out_of_range_threshold_falls_back() {
        clear_env();
        unsafe {
            env::set_var("FUZZY_MATCH_THRESHOLD", "1.5");
        }
        assert_eq!(AppConfig::from_env().fuzzy_match_threshold, 0.6);
        clear_env();
    }

    #[test]
    #[serial]
    fn setters_override_global() {
        clear_env();
        AppConfig::reset();
        AppConfig::set_runner_url("http://runner.internal");
        assert_eq!(AppConfig::global().runner_url, "http://runner.internal");
        AppConfig::reset();
        assert_eq!(AppConfig::global().runner_url, "https://emkc.org");
    }
}
