//! # Configuration State
//!
//! Stores storefront configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`DELICIA_*`)
//! 2. Config file (`storefront.toml`)
//! 3. Defaults (this file)
//!
//! ## Example `storefront.toml`
//! ```toml
//! store_name = "Delícia Assados"
//! enforce_store_hours = false
//!
//! [pickup]
//! weekday = "Sun"
//! open_hour = 8
//! close_hour = 10
//! slot_minutes = 10
//! slot_capacity = 10
//!
//! [simulation]
//! payment_delay_ms = 2500
//!
//! [mock]
//! orders = 15
//! reservations = 8
//! seed = 42
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use delicia_core::schedule::PickupWindow;

const CONFIG_FILE_NAME: &str = "storefront.toml";

/// Errors while loading `storefront.toml` or the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// Store name (shown on the front page and receipts)
    pub store_name: String,

    /// Store address lines
    pub store_address: Vec<String>,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Weekly pickup window and slot layout
    pub pickup: PickupWindow,

    /// Refuse checkout outside the pickup window.
    pub enforce_store_hours: bool,

    /// Seconds between open/closed rechecks
    pub open_status_refresh_secs: u64,

    pub simulation: SimulationConfig,

    pub mock: MockConfig,
}

/// Artificial latency of the simulated services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub payment_delay_ms: u64,
    pub reservation_delay_ms: u64,
    pub login_delay_ms: u64,

    /// PIX copy-and-paste code shown on the payment screen
    pub pix_payload: String,
}

/// How much history the session is seeded with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    pub orders: usize,
    pub reservations: usize,

    /// Fixed seed for reproducible history; random when unset
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            payment_delay_ms: 2500,
            reservation_delay_ms: 1500,
            login_delay_ms: 0,
            pix_payload: default_pix_payload(),
        }
    }
}

impl Default for MockConfig {
    fn default() -> Self {
        MockConfig {
            orders: 15,
            reservations: 8,
            seed: None,
        }
    }
}

fn default_pix_payload() -> String {
    "00020126580014br.gov.bcb.pix0136123e4567-e89b-12d3-a456-4266554400005204000053039865802BR5913Joao da Silva6009SAO PAULO62070503***6304E2A3".to_string()
}

impl Default for ConfigState {
    /// Returns default configuration suitable for development.
    ///
    /// ## Default Values
    /// - Store: "Delícia Assados", pickups Sundays 08:00-10:00
    /// - Currency: BRL (R$)
    /// - Payment takes 2.5s, reservations 1.5s
    /// - 15 mock orders, 8 mock reservations
    fn default() -> Self {
        ConfigState {
            store_name: "Delícia Assados".to_string(),
            store_address: vec![
                "Rua das Palmeiras, 120".to_string(),
                "São Paulo, SP".to_string(),
            ],
            currency_symbol: "R$".to_string(),
            pickup: PickupWindow::default(),
            enforce_store_hours: true,
            open_status_refresh_secs: 60,
            simulation: SimulationConfig::default(),
            mock: MockConfig::default(),
        }
    }
}

impl ConfigState {
    /// Loads configuration: defaults, then the TOML file, then environment.
    ///
    /// `config_path` falls back to the platform config directory
    /// (`~/.config/storefront/storefront.toml` on Linux). A missing file is
    /// not an error.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.store_name.trim().is_empty() {
            return Err(ConfigError::Invalid("store_name must not be empty".into()));
        }

        self.pickup
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.open_status_refresh_secs == 0 {
            return Err(ConfigError::Invalid(
                "open_status_refresh_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    ///
    /// ## Environment Variables
    /// - `DELICIA_STORE_NAME`: Override store name
    /// - `DELICIA_PAYMENT_DELAY_MS`: Simulated payment latency
    /// - `DELICIA_RESERVATION_DELAY_MS`: Simulated reservation latency
    /// - `DELICIA_MOCK_SEED`: Seed for the mock history
    /// - `DELICIA_PICKUP_CAPACITY`: Pickups per slot
    /// - `DELICIA_ENFORCE_HOURS`: `true`/`false`
    fn apply_env_overrides(&mut self) {
        if let Ok(name) = std::env::var("DELICIA_STORE_NAME") {
            debug!(store_name = %name, "Overriding store name from environment");
            self.store_name = name;
        }

        if let Ok(delay) = std::env::var("DELICIA_PAYMENT_DELAY_MS") {
            if let Ok(ms) = delay.parse::<u64>() {
                debug!(ms, "Overriding payment delay from environment");
                self.simulation.payment_delay_ms = ms;
            }
        }

        if let Ok(delay) = std::env::var("DELICIA_RESERVATION_DELAY_MS") {
            if let Ok(ms) = delay.parse::<u64>() {
                debug!(ms, "Overriding reservation delay from environment");
                self.simulation.reservation_delay_ms = ms;
            }
        }

        if let Ok(seed) = std::env::var("DELICIA_MOCK_SEED") {
            if let Ok(seed) = seed.parse::<u64>() {
                debug!(seed, "Overriding mock seed from environment");
                self.mock.seed = Some(seed);
            }
        }

        if let Ok(capacity) = std::env::var("DELICIA_PICKUP_CAPACITY") {
            if let Ok(capacity) = capacity.parse::<u32>() {
                debug!(capacity, "Overriding pickup slot capacity from environment");
                self.pickup.slot_capacity = capacity;
            }
        }

        if let Ok(enforce) = std::env::var("DELICIA_ENFORCE_HOURS") {
            if let Ok(enforce) = enforce.parse::<bool>() {
                debug!(enforce, "Overriding store hours enforcement from environment");
                self.enforce_store_hours = enforce;
            }
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "delicia", "storefront")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn payment_delay(&self) -> Duration {
        Duration::from_millis(self.simulation.payment_delay_ms)
    }

    pub fn reservation_delay(&self) -> Duration {
        Duration::from_millis(self.simulation.reservation_delay_ms)
    }

    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.simulation.login_delay_ms)
    }

    pub fn open_status_refresh(&self) -> Duration {
        Duration::from_secs(self.open_status_refresh_secs)
    }

    /// Formats a cent amount as a currency string, Brazilian style.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(123456), "R$ 1.234,56");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let whole = (cents / 100).abs();
        let frac = (cents % 100).abs();

        let digits = whole.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        format!(
            "{}{} {},{:02}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            grouped,
            frac
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    #[test]
    fn test_format_currency_positive() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(2590), "R$ 25,90");
        assert_eq!(config.format_currency(100), "R$ 1,00");
        assert_eq!(config.format_currency(1), "R$ 0,01");
        assert_eq!(config.format_currency(0), "R$ 0,00");
    }

    #[test]
    fn test_format_currency_negative() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(-1234), "-R$ 12,34");
    }

    #[test]
    fn test_format_currency_large() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(123456789), "R$ 1.234.567,89");
        assert_eq!(config.format_currency(100000), "R$ 1.000,00");
    }

    #[test]
    fn test_defaults_validate() {
        let config = ConfigState::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.payment_delay(), Duration::from_millis(2500));
        assert_eq!(config.reservation_delay(), Duration::from_millis(1500));
        assert_eq!(config.open_status_refresh(), Duration::from_secs(60));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ConfigState = toml::from_str(
            r#"
            store_name = "Assados do Zé"

            [pickup]
            weekday = "Sat"
            open_hour = 9
            close_hour = 12
            slot_minutes = 15
            slot_capacity = 4

            [mock]
            seed = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.store_name, "Assados do Zé");
        assert_eq!(config.pickup.weekday, Weekday::Sat);
        assert_eq!(config.pickup.slot_capacity, 4);
        assert_eq!(config.mock.seed, Some(7));
        assert_eq!(config.mock.orders, 15);
        assert_eq!(config.simulation.payment_delay_ms, 2500);
        assert!(config.enforce_store_hours);
    }

    #[test]
    fn test_validate_rejects_bad_window() {
        let mut config = ConfigState::default();
        config.pickup.open_hour = 10;
        config.pickup.close_hour = 8;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = ConfigState::default();
        config.open_status_refresh_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("delicia-storefront-does-not-exist.toml");
        let config = ConfigState::load(Some(path)).unwrap();
        assert_eq!(config.pickup, PickupWindow::default());
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let path = std::env::temp_dir().join(format!(
            "delicia-storefront-bad-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "store_name = [unterminated").unwrap();

        let result = ConfigState::load(Some(path.clone()));
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
