// src/core/config.rs
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use log::LevelFilter;
use thiserror::Error;

use crate::core::policy::{clamp_length, PolicyState, DEFAULT_LENGTH};
use crate::models::{CharClass, ClassSet};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("reveal ticks per character must be at least 1")]
    ZeroTicksPerChar,

    #[error("reveal interval must be greater than zero")]
    ZeroInterval,

    #[error("at least one default character class is required")]
    NoDefaultClasses,
}

// Configuration for the generator and its reveal animation
#[derive(Debug, Clone)]
pub struct Config {
    // Password Generation
    pub default_password_length: usize,
    pub default_classes: ClassSet,

    // Reveal animation
    pub reveal_interval: Duration,
    pub reveal_ticks_per_char: u32,

    // Logging
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Password Generation
            default_password_length: DEFAULT_LENGTH,
            default_classes: [CharClass::Upper].into_iter().collect(),

            // Reveal animation
            reveal_interval: Duration::from_millis(30),
            reveal_ticks_per_char: 3,

            // Logging
            log_level: LevelFilter::Info,
            log_file: None,
        }
    }
}

impl Config {
    // Load configuration from environment variables
    pub fn load() -> Self {
        Self::load_from(|key| env::var(key).ok())
    }

    // Load configuration from any key/value source, falling back to defaults
    pub fn load_from<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        // Password Generation
        if let Some(val) = lookup("DEFAULT_PASSWORD_LENGTH") {
            match val.trim().parse::<usize>() {
                Ok(length) => config.default_password_length = clamp_length(length),
                Err(_) => log::warn!("Ignoring invalid DEFAULT_PASSWORD_LENGTH '{}'", val),
            }
        }

        if let Some(val) = lookup("DEFAULT_CLASSES") {
            let parsed: Result<ClassSet, String> = val
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(str::parse::<CharClass>)
                .collect();
            match parsed {
                Ok(classes) if !classes.is_empty() => config.default_classes = classes,
                Ok(_) => log::warn!("DEFAULT_CLASSES is empty, keeping defaults"),
                Err(e) => log::warn!("Ignoring DEFAULT_CLASSES: {}", e),
            }
        }

        // Reveal animation
        if let Some(val) = lookup("REVEAL_INTERVAL_MS") {
            match val.trim().parse::<u64>() {
                Ok(ms) => config.reveal_interval = Duration::from_millis(ms),
                Err(_) => log::warn!("Ignoring invalid REVEAL_INTERVAL_MS '{}'", val),
            }
        }

        if let Some(val) = lookup("REVEAL_TICKS_PER_CHAR") {
            match val.trim().parse::<u32>() {
                Ok(ticks) => config.reveal_ticks_per_char = ticks,
                Err(_) => log::warn!("Ignoring invalid REVEAL_TICKS_PER_CHAR '{}'", val),
            }
        }

        // Logging
        if let Some(level) = lookup("LOG_LEVEL") {
            match level.to_lowercase().as_str() {
                "off" => config.log_level = LevelFilter::Off,
                "error" => config.log_level = LevelFilter::Error,
                "warn" => config.log_level = LevelFilter::Warn,
                "info" => config.log_level = LevelFilter::Info,
                "debug" => config.log_level = LevelFilter::Debug,
                "trace" => config.log_level = LevelFilter::Trace,
                _ => log::warn!("Unknown log level '{}', using {}", level, config.log_level),
            }
        }

        if let Some(file) = lookup("LOG_FILE") {
            if !file.trim().is_empty() {
                config.log_file = Some(PathBuf::from(file));
            }
        }

        config
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reveal_ticks_per_char == 0 {
            return Err(ConfigError::ZeroTicksPerChar);
        }
        if self.reveal_interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        if self.default_classes.is_empty() {
            return Err(ConfigError::NoDefaultClasses);
        }
        Ok(())
    }

    /// Initial policy derived from the configured defaults.
    pub fn initial_policy(&self) -> PolicyState {
        PolicyState::new(self.default_password_length, self.default_classes).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::load_from(|_| None);
        assert_eq!(config.default_password_length, 10);
        assert_eq!(config.reveal_interval, Duration::from_millis(30));
        assert_eq!(config.reveal_ticks_per_char, 3);
        assert!(config.validate().is_ok());
        assert_eq!(config.initial_policy(), PolicyState::default());
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::load_from(lookup(&[
            ("DEFAULT_PASSWORD_LENGTH", "64"),
            ("DEFAULT_CLASSES", "digit, symbol"),
            ("REVEAL_INTERVAL_MS", "5"),
            ("REVEAL_TICKS_PER_CHAR", "1"),
            ("LOG_LEVEL", "debug"),
            ("LOG_FILE", "/tmp/passforge.log"),
        ]));

        assert_eq!(config.default_password_length, 20);
        assert_eq!(
            config.default_classes.iter().collect::<Vec<_>>(),
            vec![CharClass::Digit, CharClass::Symbol]
        );
        assert_eq!(config.reveal_interval, Duration::from_millis(5));
        assert_eq!(config.reveal_ticks_per_char, 1);
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/passforge.log")));
    }

    #[test]
    fn test_invalid_values_are_ignored() {
        let config = Config::load_from(lookup(&[
            ("DEFAULT_PASSWORD_LENGTH", "long"),
            ("DEFAULT_CLASSES", "upper,emoji"),
            ("REVEAL_INTERVAL_MS", "-3"),
        ]));
        let defaults = Config::default();
        assert_eq!(config.default_password_length, defaults.default_password_length);
        assert_eq!(config.default_classes, defaults.default_classes);
        assert_eq!(config.reveal_interval, defaults.reveal_interval);
    }

    #[test]
    fn test_validate_rejects_zero_ticks() {
        let config = Config::load_from(lookup(&[("REVEAL_TICKS_PER_CHAR", "0")]));
        assert_eq!(config.validate(), Err(ConfigError::ZeroTicksPerChar));
    }
}
