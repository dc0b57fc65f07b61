//! Application configuration
//!
//! This module provides centralized configuration management using the `config` crate.
//! Configuration can be loaded from environment variables and config files.

use chrono::NaiveTime;
use config::{Config, ConfigError, Environment, File};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::env;

use crate::error::BillError;
use crate::BillResult;

/// Main application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub tariff: TariffConfig,

    #[serde(default)]
    pub call_log: CallLogConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How night minutes are derived when the day-window overlap exceeds
/// the part of the call not already billed as a long call.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NightMinutesPolicy {
    /// Keep the raw difference, even when it is negative.
    /// Reproduces the historical totals exactly.
    #[default]
    Reference,

    /// Never bill fewer than zero night minutes.
    Clamped,
}

/// Tariff configuration used by the call pricer
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TariffConfig {
    /// Price per minute inside the day window
    #[serde(default = "default_day_rate")]
    pub day_rate: Decimal,

    /// Price per minute outside the day window
    #[serde(default = "default_night_rate")]
    pub night_rate: Decimal,

    /// Price per minute beyond the long call threshold
    #[serde(default = "default_long_call_rate")]
    pub long_call_rate: Decimal,

    /// Minutes billed at day/night rates before the long call rate applies
    #[serde(default = "default_long_call_threshold")]
    pub long_call_threshold_minutes: i64,

    /// Start of the day window (inclusive)
    #[serde(default = "default_day_start")]
    pub day_start: NaiveTime,

    /// End of the day window
    #[serde(default = "default_day_end")]
    pub day_end: NaiveTime,

    /// Night minutes derivation
    #[serde(default)]
    pub night_minutes: NightMinutesPolicy,
}

fn default_day_rate() -> Decimal {
    dec!(1.0)
}

fn default_night_rate() -> Decimal {
    dec!(0.5)
}

fn default_long_call_rate() -> Decimal {
    dec!(0.2)
}

fn default_long_call_threshold() -> i64 {
    5
}

fn default_day_start() -> NaiveTime {
    NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default()
}

fn default_day_end() -> NaiveTime {
    NaiveTime::from_hms_opt(16, 0, 0).unwrap_or_default()
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            day_rate: default_day_rate(),
            night_rate: default_night_rate(),
            long_call_rate: default_long_call_rate(),
            long_call_threshold_minutes: default_long_call_threshold(),
            day_start: default_day_start(),
            day_end: default_day_end(),
            night_minutes: NightMinutesPolicy::default(),
        }
    }
}

impl TariffConfig {
    /// Reject tariffs that would produce negative prices or an empty day window
    pub fn validate(&self) -> BillResult<()> {
        for (name, rate) in [
            ("day_rate", self.day_rate),
            ("night_rate", self.night_rate),
            ("long_call_rate", self.long_call_rate),
        ] {
            if rate < Decimal::ZERO {
                return Err(BillError::Config(format!(
                    "tariff.{} must not be negative, got {}",
                    name, rate
                )));
            }
        }

        // Reference night minutes can go negative; the day rate must cover them
        if self.night_minutes == NightMinutesPolicy::Reference
            && self.night_rate > self.day_rate
        {
            return Err(BillError::Config(format!(
                "tariff.night_rate ({}) must not exceed tariff.day_rate ({}) with reference night minutes",
                self.night_rate, self.day_rate
            )));
        }

        if self.long_call_threshold_minutes < 0 {
            return Err(BillError::Config(format!(
                "tariff.long_call_threshold_minutes must not be negative, got {}",
                self.long_call_threshold_minutes
            )));
        }

        if self.day_start >= self.day_end {
            return Err(BillError::Config(format!(
                "tariff.day_start ({}) must be before tariff.day_end ({})",
                self.day_start, self.day_end
            )));
        }

        Ok(())
    }
}

/// Call log text format
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CallLogConfig {
    /// Field delimiter within a line
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// chrono format string for call start/end timestamps
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

fn default_delimiter() -> char {
    ','
}

fn default_timestamp_format() -> String {
    "%d-%m-%Y %H:%M:%S".to_string()
}

impl Default for CallLogConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            timestamp_format: default_timestamp_format(),
        }
    }
}

/// Log output format
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Default level when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and optional config files
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Start with default values
            .set_default("tariff.day_rate", "1.0")?
            .set_default("tariff.night_rate", "0.5")?
            .set_default("tariff.long_call_rate", "0.2")?
            .set_default("tariff.long_call_threshold_minutes", 5)?
            .set_default("tariff.day_start", "08:00:00")?
            .set_default("tariff.day_end", "16:00:00")?
            .set_default("tariff.night_minutes", "reference")?
            .set_default("call_log.delimiter", ",")?
            .set_default("call_log.timestamp_format", "%d-%m-%Y %H:%M:%S")?
            .set_default("logging.level", "warn")?
            .set_default("logging.format", "pretty")?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables with TELBILL_ prefix
            .add_source(
                Environment::with_prefix("TELBILL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(Environment::with_prefix("TELBILL").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Check cross-field constraints that serde cannot express
    pub fn validate(&self) -> BillResult<()> {
        self.tariff.validate()?;

        if self.call_log.timestamp_format.trim().is_empty() {
            return Err(BillError::Config(
                "call_log.timestamp_format must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
