use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::application::DEFAULT_SUBMIT_DELAY;

pub const SUBMIT_DELAY_VAR: &str = "JOBFORM_SUBMIT_DELAY_MS";
pub const LOG_LEVEL_VAR: &str = "JOBFORM_LOG_LEVEL";
pub const LOG_FILE_VAR: &str = "JOBFORM_LOG_FILE";

/// Top-level configuration for the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub submit_delay: Duration,
    pub telemetry: TelemetryConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            submit_delay: DEFAULT_SUBMIT_DELAY,
            telemetry: TelemetryConfig::default(),
        }
    }
}

/// Logging controls.
///
/// Nothing is logged unless `log_file` is set: the terminal belongs to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

/// Values given on the command line; each one overrides the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub submit_delay_ms: Option<u64>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    /// Reads `.env` (if present) and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let submit_delay = match env::var(SUBMIT_DELAY_VAR) {
            Ok(raw) => parse_delay(&raw)?,
            Err(_) => DEFAULT_SUBMIT_DELAY,
        };

        let log_level = env::var(LOG_LEVEL_VAR).unwrap_or_else(|_| "info".to_string());
        let log_file = env::var(LOG_FILE_VAR)
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            submit_delay,
            telemetry: TelemetryConfig { log_level, log_file },
        })
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(ms) = overrides.submit_delay_ms {
            self.submit_delay = Duration::from_millis(ms);
        }
        if let Some(level) = overrides.log_level {
            self.telemetry.log_level = level;
        }
        if let Some(path) = overrides.log_file {
            self.telemetry.log_file = Some(path);
        }
        self
    }
}

fn parse_delay(raw: &str) -> Result<Duration, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ConfigError::InvalidSubmitDelay {
            value: raw.to_string(),
        })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidSubmitDelay { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSubmitDelay { value } => {
                write!(f, "{SUBMIT_DELAY_VAR} must be a whole number of milliseconds, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        unsafe {
            env::remove_var(SUBMIT_DELAY_VAR);
            env::remove_var(LOG_LEVEL_VAR);
            env::remove_var(LOG_FILE_VAR);
        }
    }

    #[test]
    fn test_defaults_without_environment() {
        let _lock = env_guard().lock().unwrap_or_else(|e| e.into_inner());
        reset_env();

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.submit_delay, Duration::from_millis(500));
        assert!(config.telemetry.log_file.is_none());
    }

    #[test]
    fn test_reads_environment() {
        let _lock = env_guard().lock().unwrap_or_else(|e| e.into_inner());
        reset_env();
        unsafe {
            env::set_var(SUBMIT_DELAY_VAR, " 1200 ");
            env::set_var(LOG_LEVEL_VAR, "debug");
            env::set_var(LOG_FILE_VAR, "/tmp/jobform.log");
        }

        let config = AppConfig::from_env().unwrap();
        reset_env();

        assert_eq!(config.submit_delay, Duration::from_millis(1200));
        assert_eq!(config.telemetry.log_level, "debug");
        assert_eq!(config.telemetry.log_file, Some(PathBuf::from("/tmp/jobform.log")));
    }

    #[test]
    fn test_invalid_delay_is_rejected() {
        let _lock = env_guard().lock().unwrap_or_else(|e| e.into_inner());
        reset_env();
        unsafe {
            env::set_var(SUBMIT_DELAY_VAR, "soon");
        }

        let err = AppConfig::from_env().unwrap_err();
        reset_env();

        assert_eq!(err, ConfigError::InvalidSubmitDelay { value: "soon".to_string() });
        assert!(err.to_string().contains("JOBFORM_SUBMIT_DELAY_MS"));
    }

    #[test]
    fn test_overrides_win() {
        let config = AppConfig::default().with_overrides(ConfigOverrides {
            submit_delay_ms: Some(0),
            log_level: Some("trace".to_string()),
            log_file: Some(PathBuf::from("run.log")),
        });

        assert_eq!(config.submit_delay, Duration::ZERO);
        assert_eq!(config.telemetry.log_level, "trace");
        assert_eq!(config.telemetry.log_file, Some(PathBuf::from("run.log")));
    }

    #[test]
    fn test_empty_overrides_keep_values() {
        let config = AppConfig::default().with_overrides(ConfigOverrides::default());
        assert_eq!(config, AppConfig::default());
    }
}
