//! Bot settings loaded from `config.toml` with environment overrides.
//!
//! The file is optional: a deployment that only sets environment variables (or
//! nothing at all) gets the Colombian defaults of UTC-5, Spanish replies and pesos.

use crate::entities::Locale;
use crate::errors::{Error, Result};
use chrono::FixedOffset;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_CONFIG_PATH: &str = "config.toml";
const DEFAULT_TZ_OFFSET_HOURS: i32 = -5;
const SECONDS_PER_HOUR: i32 = 3600;

/// Deployment-wide settings
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Fixed UTC offset used for every period boundary, no daylight saving
    pub timezone_offset_hours: i32,
    /// Reply language for users that never picked one
    pub default_locale: Locale,
    /// ISO currency code printed next to amounts
    pub currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timezone_offset_hours: DEFAULT_TZ_OFFSET_HOURS,
            default_locale: Locale::Es,
            currency: "COP".to_string(),
        }
    }
}

impl Settings {
    /// Parses settings from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| Error::Config {
            message: format!("Failed to parse config.toml: {e}"),
        })
    }

    /// Loads settings from a TOML file, or defaults when the file does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        tracing::debug!("Loading configuration from {:?}", path);
        let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("Failed to read config file {}: {e}", path.display()),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Applies overrides from a variable lookup (the process environment in production).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("TZ_OFFSET_HOURS") {
            self.timezone_offset_hours = raw.trim().parse().map_err(|_| Error::Config {
                message: format!("TZ_OFFSET_HOURS must be an integer, got '{raw}'"),
            })?;
        }
        if let Some(raw) = lookup("DEFAULT_LOCALE") {
            self.default_locale = raw.parse().map_err(|_| Error::Config {
                message: format!("DEFAULT_LOCALE must be 'es' or 'en', got '{raw}'"),
            })?;
        }
        if let Some(raw) = lookup("CURRENCY") {
            self.currency = raw.trim().to_uppercase();
        }
        Ok(())
    }

    /// Checks value ranges after all sources were merged.
    pub fn validate(&self) -> Result<()> {
        if !(-12..=14).contains(&self.timezone_offset_hours) {
            return Err(Error::Config {
                message: format!(
                    "timezone_offset_hours must be between -12 and 14, got {}",
                    self.timezone_offset_hours
                ),
            });
        }
        if self.currency.trim().is_empty() {
            return Err(Error::Config {
                message: "currency cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    /// The configured offset as a `chrono` timezone.
    pub fn offset(&self) -> Result<FixedOffset> {
        FixedOffset::east_opt(self.timezone_offset_hours * SECONDS_PER_HOUR).ok_or_else(|| {
            Error::Config {
                message: format!("invalid timezone offset {}", self.timezone_offset_hours),
            }
        })
    }
}

/// Loads settings the way the binary does: `GASTO_CONFIG` (or `./config.toml`),
/// then environment overrides, then validation.
pub fn load_settings() -> Result<Settings> {
    let path = std::env::var("GASTO_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let mut settings = Settings::load(&path)?;
    settings.apply_overrides(|key| std::env::var(key).ok())?;
    settings.validate()?;
    tracing::info!(
        "Settings loaded: offset {}h, locale {:?}, currency {}",
        settings.timezone_offset_hours,
        settings.default_locale,
        settings.currency
    );
    Ok(settings)
}
