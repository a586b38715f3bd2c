//! # Configuration State
//!
//! Workshop profile and display settings loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`TALLER_*`)
//! 2. Config file (`--config <path>` or `<config dir>/taller.toml`)
//! 3. Defaults (this file)
//!
//! ## Example `taller.toml`
//! ```toml
//! [profile]
//! name = "AutoTaller Pro"
//! phone = "(01) 234-5678"
//!
//! [currency]
//! symbol = "S/ "
//! decimals = 2
//! thousands_separator = ","
//!
//! strict_transitions = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use taller_core::{Money, TransitionPolicy};
use taller_store::{Clock, StoreConfig};

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// =============================================================================
// Workshop Profile
// =============================================================================

/// Workshop contact card shown on the home view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkshopProfile {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,

    /// Opening hours as display lines.
    pub hours: Vec<String>,

    /// Start of the working day (`HH:MM`).
    pub opens_at: String,

    /// End of the working day (`HH:MM`).
    pub closes_at: String,
}

impl Default for WorkshopProfile {
    fn default() -> Self {
        WorkshopProfile {
            name: "AutoTaller Pro".to_string(),
            address: "Av. Principal 123, San Isidro, Lima".to_string(),
            phone: "(01) 234-5678".to_string(),
            email: "contacto@autotaller.com".to_string(),
            hours: vec![
                "Lunes a Viernes: 8:00 AM - 6:00 PM".to_string(),
                "Sábados: 8:00 AM - 2:00 PM".to_string(),
                "Domingos: Cerrado".to_string(),
            ],
            opens_at: "08:00".to_string(),
            closes_at: "18:00".to_string(),
        }
    }
}

// =============================================================================
// Currency Format
// =============================================================================

/// How amounts are rendered in views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyFormat {
    pub symbol: String,

    /// Decimal places shown, 0 to 2. Amounts are rounded half away from
    /// zero to that precision.
    pub decimals: u8,

    /// Inserted every three digits of the whole part; empty for none.
    pub thousands_separator: String,
}

impl Default for CurrencyFormat {
    /// `$50,000` style, matching catalog prices quoted in whole units.
    fn default() -> Self {
        CurrencyFormat {
            symbol: "$".to_string(),
            decimals: 0,
            thousands_separator: ",".to_string(),
        }
    }
}

// =============================================================================
// Config State
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    pub profile: WorkshopProfile,
    pub currency: CurrencyFormat,

    /// Only Confirmed appointments may be completed or cancelled.
    pub strict_transitions: bool,
}

impl ConfigState {
    /// Loads configuration: defaults, then the file, then the environment.
    ///
    /// A missing file is not an error; an unreadable or invalid one is.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = ConfigState::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Loads config or returns defaults (with env overrides) if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            let mut config = ConfigState::default();
            config.apply_env_overrides();
            config
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// `<platform config dir>/taller.toml`
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "autotaller", "taller")
            .map(|dirs| dirs.config_dir().join("taller.toml"))
    }

    /// Applies `TALLER_*` environment variables.
    ///
    /// ## Environment Variables
    /// - `TALLER_WORKSHOP_NAME`: workshop name
    /// - `TALLER_PHONE`: workshop phone
    /// - `TALLER_CURRENCY_SYMBOL`: currency symbol
    /// - `TALLER_STRICT_TRANSITIONS`: `true`/`1` or `false`/`0`
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(name) = var("TALLER_WORKSHOP_NAME") {
            debug!(name = %name, "Overriding workshop name from environment");
            self.profile.name = name;
        }

        if let Some(phone) = var("TALLER_PHONE") {
            self.profile.phone = phone;
        }

        if let Some(symbol) = var("TALLER_CURRENCY_SYMBOL") {
            self.currency.symbol = symbol;
        }

        if let Some(strict) = var("TALLER_STRICT_TRANSITIONS") {
            match strict.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => self.strict_transitions = true,
                "0" | "false" | "no" => self.strict_transitions = false,
                other => warn!(value = %other, "Ignoring TALLER_STRICT_TRANSITIONS"),
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.profile.name.trim().is_empty() {
            return Err(ConfigError::Invalid("profile.name must not be empty".into()));
        }
        if self.currency.decimals > 2 {
            return Err(ConfigError::Invalid(format!(
                "currency.decimals must be 0, 1 or 2, got {}",
                self.currency.decimals
            )));
        }
        Ok(())
    }

    pub fn transition_policy(&self) -> TransitionPolicy {
        if self.strict_transitions {
            TransitionPolicy::Strict
        } else {
            TransitionPolicy::Lenient
        }
    }

    /// Store configuration derived from these settings.
    pub fn store_config(&self, clock: Clock) -> StoreConfig {
        StoreConfig::new()
            .transition_policy(self.transition_policy())
            .clock(clock)
    }

    /// Formats an amount with the configured symbol, precision and separator.
    ///
    /// ## Example
    /// ```rust
    /// use taller_console::state::ConfigState;
    /// use taller_core::Money;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_major(120_000)), "$120,000");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let decimals = u32::from(self.currency.decimals.min(2));
        let step = 10_i64.pow(2 - decimals);

        let cents = amount.cents();
        let magnitude = cents.unsigned_abs() as i64;
        let units = (magnitude + step / 2) / step;

        let divisor = 10_i64.pow(decimals);
        let whole = group_thousands(units / divisor, &self.currency.thousands_separator);
        let sign = if cents < 0 && units != 0 { "-" } else { "" };

        if decimals > 0 {
            format!(
                "{}{}{}.{:0width$}",
                sign,
                self.currency.symbol,
                whole,
                units % divisor,
                width = decimals as usize
            )
        } else {
            format!("{}{}{}", sign, self.currency.symbol, whole)
        }
    }
}

fn group_thousands(value: i64, separator: &str) -> String {
    let digits = value.to_string();
    if separator.is_empty() {
        return digits;
    }
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}
