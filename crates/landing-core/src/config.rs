#![forbid(unsafe_code)]

//! Tunable parameters for the landing sequence.
//!
//! Every field defaults to the behavior the landing page ships with, so
//! `LandingConfig::default()` is the production configuration. With the
//! `config` feature the same struct can be loaded from TOML or JSON:
//!
//! ```toml
//! breakpoint_px = 768
//! tick_interval_ms = 150
//! max_increment = 15.0
//! settle_delay_ms = 500
//! confirm_dwell_ms = 3000
//! mobile_url = "https://reabotlives.netlify.app"
//! desktop_url = "https://portfolio-wine-kappa-99.vercel.app/"
//! ```
//!
//! Omitted keys keep their defaults. Loaders validate before returning.

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use core::time::Duration;

use crate::destination::{DEFAULT_DESKTOP_URL, DEFAULT_MOBILE_URL, Destinations};
use crate::progress::DEFAULT_MAX_INCREMENT;
use crate::viewport::MOBILE_BREAKPOINT_PX;

pub const DEFAULT_TICK_INTERVAL_MS: u64 = 150;
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 500;
pub const DEFAULT_CONFIRM_DWELL_MS: u64 = 3000;

/// Landing sequence configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default, deny_unknown_fields))]
pub struct LandingConfig {
    /// Widths below this are mobile. Default: 768.
    pub breakpoint_px: u32,
    /// Period of the progress timer. Default: 150.
    pub tick_interval_ms: u64,
    /// Exclusive upper bound of one progress increment. Default: 15.0.
    pub max_increment: f64,
    /// Delay between progress completing and entering Confirming. Default: 500.
    pub settle_delay_ms: u64,
    /// Time spent in Confirming before embedding. Default: 3000.
    pub confirm_dwell_ms: u64,
    pub mobile_url: String,
    pub desktop_url: String,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            breakpoint_px: MOBILE_BREAKPOINT_PX,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            max_increment: DEFAULT_MAX_INCREMENT,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            confirm_dwell_ms: DEFAULT_CONFIRM_DWELL_MS,
            mobile_url: DEFAULT_MOBILE_URL.to_owned(),
            desktop_url: DEFAULT_DESKTOP_URL.to_owned(),
        }
    }
}

impl LandingConfig {
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    #[must_use]
    pub const fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    #[must_use]
    pub const fn confirm_dwell(&self) -> Duration {
        Duration::from_millis(self.confirm_dwell_ms)
    }

    #[must_use]
    pub fn destinations(&self) -> Destinations {
        Destinations {
            mobile: self.mobile_url.clone(),
            desktop: self.desktop_url.clone(),
        }
    }

    /// Check every field, collecting all violations.
    pub fn validate(&self) -> Result<(), LandingConfigError> {
        let mut errors = Vec::new();
        if self.breakpoint_px == 0 {
            errors.push("breakpoint_px must be > 0".to_owned());
        }
        if self.tick_interval_ms == 0 {
            errors.push("tick_interval_ms must be > 0".to_owned());
        }
        if !self.max_increment.is_finite() || self.max_increment <= 0.0 {
            errors.push(format!(
                "max_increment must be finite and > 0, got {}",
                self.max_increment
            ));
        }
        if self.mobile_url.trim().is_empty() {
            errors.push("mobile_url must not be empty".to_owned());
        }
        if self.desktop_url.trim().is_empty() {
            errors.push("desktop_url must not be empty".to_owned());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(LandingConfigError::Validation(errors))
        }
    }
}

#[cfg(feature = "config")]
impl LandingConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, LandingConfigError> {
        let config: Self = toml::from_str(s).map_err(LandingConfigError::Toml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, LandingConfigError> {
        let content = std::fs::read_to_string(path).map_err(LandingConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    pub fn from_json_str(s: &str) -> Result<Self, LandingConfigError> {
        let config: Self = serde_json::from_str(s).map_err(LandingConfigError::Json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Errors that can occur when loading a landing configuration.
#[derive(Debug)]
pub enum LandingConfigError {
    /// The config file could not be read.
    Io(std::io::Error),
    /// The TOML document does not describe a `LandingConfig`.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// The JSON handed over by the page does not describe a `LandingConfig`.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Fields parsed but break an invariant; one message per field.
    Validation(Vec<String>),
}

impl std::fmt::Display for LandingConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "cannot read landing config: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "landing config TOML: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "landing config JSON: {e}"),
            Self::Validation(errors) => {
                write!(f, "rejected landing config: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for LandingConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_constants() {
        let config = LandingConfig::default();
        assert_eq!(config.breakpoint_px, 768);
        assert_eq!(config.tick_interval(), Duration::from_millis(150));
        assert_eq!(config.max_increment, 15.0);
        assert_eq!(config.settle_delay(), Duration::from_millis(500));
        assert_eq!(config.confirm_dwell(), Duration::from_millis(3000));
        assert_eq!(config.mobile_url, "https://reabotlives.netlify.app");
        assert_eq!(
            config.desktop_url,
            "https://portfolio-wine-kappa-99.vercel.app/"
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validation_lists_every_violation() {
        let config = LandingConfig {
            breakpoint_px: 0,
            tick_interval_ms: 0,
            max_increment: f64::NAN,
            mobile_url: "  ".to_owned(),
            desktop_url: String::new(),
            ..LandingConfig::default()
        };
        match config.validate() {
            Err(LandingConfigError::Validation(errors)) => assert_eq!(errors.len(), 5),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn zero_delays_are_allowed() {
        let config = LandingConfig {
            settle_delay_ms: 0,
            confirm_dwell_ms: 0,
            ..LandingConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn error_display() {
        let err = LandingConfigError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "rejected landing config: a; b");
    }

    #[cfg(feature = "config")]
    mod serde_loading {
        use super::super::*;

        #[test]
        fn partial_toml_keeps_defaults() {
            let config = LandingConfig::from_toml_str("confirm_dwell_ms = 1000\n")
                .expect("partial toml should load");
            assert_eq!(config.confirm_dwell_ms, 1000);
            assert_eq!(config.breakpoint_px, 768);
        }

        #[test]
        fn json_round_trips_through_validation() {
            let config = LandingConfig::from_json_str(
                r#"{"breakpoint_px": 1024, "mobile_url": "https://m.example"}"#,
            )
            .expect("json should load");
            assert_eq!(config.breakpoint_px, 1024);
            assert_eq!(config.mobile_url, "https://m.example");
        }

        #[test]
        fn invalid_values_are_rejected_after_parse() {
            let err = LandingConfig::from_json_str(r#"{"tick_interval_ms": 0}"#)
                .expect_err("zero interval must be rejected");
            assert!(matches!(err, LandingConfigError::Validation(_)));
        }

        #[test]
        fn unknown_keys_are_rejected() {
            let err = LandingConfig::from_toml_str("breakpiont_px = 10\n")
                .expect_err("typo must be rejected");
            assert!(matches!(err, LandingConfigError::Toml(_)));
        }

        #[test]
        fn loads_from_file() {
            let dir = tempfile::tempdir().expect("tempdir");
            let path = dir.path().join("landing.toml");
            std::fs::write(&path, "breakpoint_px = 600\n").expect("write config");
            let config = LandingConfig::from_toml_file(&path).expect("file should load");
            assert_eq!(config.breakpoint_px, 600);
        }

        #[test]
        fn missing_file_is_io_error() {
            let err = LandingConfig::from_toml_file("/nonexistent/landing.toml")
                .expect_err("missing file");
            assert!(matches!(err, LandingConfigError::Io(_)));
        }

        #[test]
        fn default_serializes_to_loadable_toml() {
            let text = LandingConfig::default()
                .to_toml_string()
                .expect("serialize");
            let back = LandingConfig::from_toml_str(&text).expect("reload");
            assert_eq!(back, LandingConfig::default());
        }
    }
}
