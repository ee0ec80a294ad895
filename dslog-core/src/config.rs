use std::{fmt, path::PathBuf};

use derive_from_env::FromEnv;

use crate::Severity;

/// Initial logger settings read from `DSLOG_*` environment variables.
#[derive(FromEnv, Debug, Clone, PartialEq)]
#[from_env(prefix = "DSLOG")]
#[allow(non_snake_case)]
pub struct EnvConfig {
    #[from_env(default = "INFO")]
    pub LEVEL: Severity,
    #[from_env(default = "log.txt")]
    pub FILE: PathBuf,
    #[from_env(default = "false")]
    pub SAVE_TO_FILE: bool,
    #[from_env(default = "false")]
    pub TIMER: bool,
    #[from_env(default = "true")]
    pub ENABLED: bool,
}

impl EnvConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_env().map_err(|err| ConfigError::Env(err.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A `DSLOG_*` variable is set but does not parse.
    Env(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Env(reason) => write!(f, "invalid logger environment: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[test]
fn test_env_config() {
    const VARS: [&str; 5] = [
        "DSLOG_LEVEL",
        "DSLOG_FILE",
        "DSLOG_SAVE_TO_FILE",
        "DSLOG_TIMER",
        "DSLOG_ENABLED",
    ];
    // SAFETY: this is the only test of the crate touching DSLOG_* variables.
    unsafe {
        for var in VARS {
            std::env::remove_var(var);
        }
    }
    let defaults = EnvConfig::load().unwrap();
    assert_eq!(defaults.LEVEL, Severity::Info);
    assert_eq!(defaults.FILE, PathBuf::from("log.txt"));
    assert!(!defaults.SAVE_TO_FILE);
    assert!(!defaults.TIMER);
    assert!(defaults.ENABLED);

    unsafe {
        std::env::set_var("DSLOG_LEVEL", "warning");
        std::env::set_var("DSLOG_FILE", "/tmp/dslog_env.log");
        std::env::set_var("DSLOG_SAVE_TO_FILE", "true");
        std::env::set_var("DSLOG_TIMER", "true");
        std::env::set_var("DSLOG_ENABLED", "false");
    }
    let config = EnvConfig::load().unwrap();
    assert_eq!(config.LEVEL, Severity::Warning);
    assert_eq!(config.FILE, PathBuf::from("/tmp/dslog_env.log"));
    assert!(config.SAVE_TO_FILE);
    assert!(config.TIMER);
    assert!(!config.ENABLED);

    unsafe {
        std::env::set_var("DSLOG_LEVEL", "loud");
    }
    assert!(matches!(EnvConfig::load(), Err(ConfigError::Env(_))));

    unsafe {
        for var in VARS {
            std::env::remove_var(var);
        }
    }
}
