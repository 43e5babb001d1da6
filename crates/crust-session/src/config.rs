//! # Session Configuration
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`CRUST_*`)
//! 2. Config file (`crust.toml`)
//! 3. Defaults (this file)
//!
//! ## Configuration File Format
//! ```toml
//! # crust.toml
//! currency_symbol = "$"
//! currency_decimals = 2
//! log_filter = "info,crust=debug"
//! default_drink_slot_limit = 4
//! ```
//!
//! Configuration is read-only once a session is running.

use std::path::{Path, PathBuf};

use crust_core::{Money, DEFAULT_DRINK_SLOT_LIMIT};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{SessionError, SessionResult};

/// Config file name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "crust.toml";

/// Most decimal places `currency_decimals` may ask for.
pub const MAX_CURRENCY_DECIMALS: u8 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places shown for currency (0 to 4)
    pub currency_decimals: u8,

    /// `tracing` filter used when `RUST_LOG` is not set
    pub log_filter: String,

    /// Drink slots for combos whose catalog entry states no limit
    pub default_drink_slot_limit: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            log_filter: "info,crust=debug".to_string(),
            default_drink_slot_limit: DEFAULT_DRINK_SLOT_LIMIT,
        }
    }
}

impl SessionConfig {
    /// Loads configuration: defaults, then the TOML file (if present), then
    /// environment overrides.
    ///
    /// `path` overrides the platform config location. A missing file is not
    /// an error; an unreadable or invalid one is.
    pub fn load(path: Option<&Path>) -> SessionResult<Self> {
        let path = path.map(Path::to_path_buf).or_else(default_config_path);

        let mut config = match path {
            Some(path) if path.exists() => {
                debug!(path = %path.display(), "loading session config");
                let text = std::fs::read_to_string(&path).map_err(|e| {
                    SessionError::Config(format!("cannot read {}: {}", path.display(), e))
                })?;
                SessionConfig::from_toml_str(&text)?
            }
            _ => SessionConfig::default(),
        };

        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> SessionResult<Self> {
        let config: SessionConfig =
            toml::from_str(text).map_err(|e| SessionError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values serde cannot: `currency_decimals` must be at most
    /// [`MAX_CURRENCY_DECIMALS`].
    pub fn validate(&self) -> SessionResult<()> {
        if self.currency_decimals > MAX_CURRENCY_DECIMALS {
            return Err(SessionError::Config(format!(
                "currency_decimals must be between 0 and {}, got {}",
                MAX_CURRENCY_DECIMALS, self.currency_decimals
            )));
        }
        Ok(())
    }

    /// Defaults with environment overrides applied.
    ///
    /// ## Environment Variables
    /// - `CRUST_CURRENCY_SYMBOL`: Override currency symbol
    /// - `CRUST_LOG_FILTER`: Override the default log filter
    /// - `CRUST_DRINK_SLOT_LIMIT`: Override the default drink slot limit
    pub fn from_env() -> Self {
        let mut config = SessionConfig::default();
        config.apply_env();
        config
    }

    fn apply_env(&mut self) {
        if let Ok(symbol) = std::env::var("CRUST_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Ok(filter) = std::env::var("CRUST_LOG_FILTER") {
            self.log_filter = filter;
        }

        if let Ok(limit) = std::env::var("CRUST_DRINK_SLOT_LIMIT") {
            match limit.parse::<usize>() {
                Ok(limit) => self.default_drink_slot_limit = limit,
                Err(_) => warn!(value = %limit, "ignoring invalid CRUST_DRINK_SLOT_LIMIT"),
            }
        }
    }

    /// Formats an amount for display.
    ///
    /// A `currency_decimals` above [`MAX_CURRENCY_DECIMALS`] (only possible by
    /// setting the field directly) is shown with the maximum.
    ///
    /// ## Example
    /// ```rust
    /// use crust_core::Money;
    /// use crust_session::SessionConfig;
    ///
    /// let config = SessionConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(5898)), "$58.98");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let decimals = u32::from(self.currency_decimals.min(MAX_CURRENCY_DECIMALS));
        let cents = i128::from(amount.cents());
        // Money holds hundredths; rescale when the display precision differs.
        let scaled = match decimals {
            0 => (cents + if cents < 0 { -50 } else { 50 }) / 100,
            1 => (cents + if cents < 0 { -5 } else { 5 }) / 10,
            2 => cents,
            d => cents * 10_i128.pow(d - 2),
        };
        let divisor = 10_i128.pow(decimals);
        let whole = scaled / divisor;
        let frac = (scaled % divisor).abs();

        format!(
            "{}{}{}",
            if scaled < 0 { "-" } else { "" },
            self.currency_symbol,
            if decimals > 0 {
                format!("{}.{:0width$}", whole.abs(), frac, width = decimals as usize)
            } else {
                whole.abs().to_string()
            }
        )
    }
}

/// Platform config path, e.g. `~/.config/crust/crust.toml` on Linux.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "crust", "crust").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        let config = SessionConfig::default();
        assert_eq!(config.format_currency(Money::from_cents(5898)), "$58.98");
        assert_eq!(config.format_currency(Money::from_cents(800)), "$8.00");
        assert_eq!(config.format_currency(Money::from_cents(1)), "$0.01");
        assert_eq!(config.format_currency(Money::from_cents(-250)), "-$2.50");
    }

    #[test]
    fn test_format_currency_other_precisions() {
        let mut config = SessionConfig::default();
        config.currency_symbol = "¥".to_string();
        config.currency_decimals = 0;
        assert_eq!(config.format_currency(Money::from_cents(5898)), "¥59");
        assert_eq!(config.format_currency(Money::from_cents(5849)), "¥58");

        config.currency_decimals = 3;
        assert_eq!(config.format_currency(Money::from_cents(250)), "¥2.500");
    }

    #[test]
    fn test_from_toml_keeps_defaults_for_missing_keys() {
        let config = SessionConfig::from_toml_str("currency_symbol = \"€\"").unwrap();
        assert_eq!(config.currency_symbol, "€");
        assert_eq!(config.currency_decimals, 2);
        assert_eq!(config.default_drink_slot_limit, DEFAULT_DRINK_SLOT_LIMIT);
    }

    #[test]
    fn test_from_toml_rejects_bad_types() {
        assert!(matches!(
            SessionConfig::from_toml_str("currency_decimals = \"two\""),
            Err(SessionError::Config(_))
        ));
    }

    #[test]
    fn test_from_toml_rejects_too_many_decimals() {
        assert!(SessionConfig::from_toml_str("currency_decimals = 4").is_ok());
        assert!(matches!(
            SessionConfig::from_toml_str("currency_decimals = 19"),
            Err(SessionError::Config(_))
        ));
    }

    #[test]
    fn test_format_currency_never_overflows() {
        let mut config = SessionConfig::default();
        config.currency_decimals = 19;
        assert_eq!(config.format_currency(Money::from_cents(100)), "$1.0000");

        config.currency_decimals = 4;
        let max = config.format_currency(Money::from_cents(i64::MAX));
        assert_eq!(max, "$92233720368547758.0700");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("crust-session-missing-config.toml");
        let config = SessionConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.currency_decimals, 2);
    }

    #[test]
    fn test_load_reads_file() {
        let path = std::env::temp_dir().join(format!(
            "crust-session-config-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "currency_decimals = 2\nlog_filter = \"warn\"\n").unwrap();

        let config = SessionConfig::load(Some(path.as_path())).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.currency_decimals, 2);
        if std::env::var("CRUST_LOG_FILTER").is_err() {
            assert_eq!(config.log_filter, "warn");
        }
    }
}
