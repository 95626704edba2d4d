//! Widget configuration.
//!
//! [`WidgetConfig::default`] carries the built-in values used by the browser
//! build. [`WidgetConfig::from_env`] lets headless hosts override them.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `BASKET_STORAGE_KEY` - Storage slot for the cart (default: `nasir_cart`)
//! - `BASKET_CHECKOUT_URL` - Messaging service base URL (default: `https://wa.me`)
//! - `BASKET_CHECKOUT_DESTINATION` - Destination phone number, digits only
//!   (default: `2348101306497`)
//! - `BASKET_CURRENCY_SYMBOL` - Currency symbol shown next to amounts (default: `₦`)
//! - `BASKET_THOUSANDS_SEPARATOR` - Digit group separator (default: `,`)
//! - `BASKET_HIGHLIGHT_CLASS` - Class flashed on an add control (default: `btn-success`)
//! - `BASKET_HIGHLIGHT_MS` - How long the flash lasts (default: `300`)

use std::time::Duration;

use basket_core::NumberFormat;
use thiserror::Error;
use url::Url;

pub const DEFAULT_STORAGE_KEY: &str = "nasir_cart";
pub const DEFAULT_CHECKOUT_URL: &str = "https://wa.me";
pub const DEFAULT_CHECKOUT_DESTINATION: &str = "2348101306497";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₦";
pub const DEFAULT_HIGHLIGHT_CLASS: &str = "btn-success";
pub const DEFAULT_HIGHLIGHT_MS: u64 = 300;

const MIN_DESTINATION_DIGITS: usize = 7;
const MAX_DESTINATION_DIGITS: usize = 15;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart widget configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    /// Key of the storage slot holding the serialized cart
    pub storage_key: String,
    /// Outbound checkout link configuration
    pub checkout: CheckoutConfig,
    /// Currency symbol shown next to amounts
    pub currency_symbol: String,
    /// Digit grouping for displayed amounts
    pub number_format: NumberFormat,
    /// Acknowledgment flash on add controls
    pub highlight: HighlightConfig,
}

/// Checkout hand-off configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// Messaging service base URL
    pub base_url: String,
    /// Fixed destination the order message is sent to
    pub destination: String,
}

/// Transient highlight applied to an add control after a click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightConfig {
    /// CSS class to add and later remove
    pub class: String,
    /// Delay before the class is removed
    pub delay: Duration,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            checkout: CheckoutConfig::default(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            number_format: NumberFormat::default(),
            highlight: HighlightConfig::default(),
        }
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CHECKOUT_URL.to_string(),
            destination: DEFAULT_CHECKOUT_DESTINATION.to_string(),
        }
    }
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            class: DEFAULT_HIGHLIGHT_CLASS.to_string(),
            delay: Duration::from_millis(DEFAULT_HIGHLIGHT_MS),
        }
    }
}

impl WidgetConfig {
    /// Load configuration from environment variables, falling back to defaults.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let storage_key = get("BASKET_STORAGE_KEY", DEFAULT_STORAGE_KEY);
        validate_storage_key(&storage_key, "BASKET_STORAGE_KEY")?;

        let base_url = parse_base_url(
            &get("BASKET_CHECKOUT_URL", DEFAULT_CHECKOUT_URL),
            "BASKET_CHECKOUT_URL",
        )?;

        let destination = get("BASKET_CHECKOUT_DESTINATION", DEFAULT_CHECKOUT_DESTINATION);
        validate_destination(&destination, "BASKET_CHECKOUT_DESTINATION")?;

        let currency_symbol = get("BASKET_CURRENCY_SYMBOL", DEFAULT_CURRENCY_SYMBOL);

        let separator = get("BASKET_THOUSANDS_SEPARATOR", ",");
        let number_format = parse_separator(&separator, "BASKET_THOUSANDS_SEPARATOR")?;

        let class = get("BASKET_HIGHLIGHT_CLASS", DEFAULT_HIGHLIGHT_CLASS);
        if class.trim().is_empty() || class.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidEnvVar(
                "BASKET_HIGHLIGHT_CLASS".to_string(),
                "must be a single class name".to_string(),
            ));
        }

        let delay_ms = get("BASKET_HIGHLIGHT_MS", &DEFAULT_HIGHLIGHT_MS.to_string())
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("BASKET_HIGHLIGHT_MS".to_string(), e.to_string())
            })?;

        Ok(Self {
            storage_key,
            checkout: CheckoutConfig {
                base_url,
                destination,
            },
            currency_symbol,
            number_format,
            highlight: HighlightConfig {
                class,
                delay: Duration::from_millis(delay_ms),
            },
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Storage keys double as file names for the file-backed store.
fn validate_storage_key(key: &str, var_name: &str) -> Result<(), ConfigError> {
    if key.is_empty()
        || !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "must be non-empty and contain only letters, digits, '_' or '-'".to_string(),
        ));
    }
    Ok(())
}

/// Validate the messaging service URL; only http(s) is accepted.
///
/// Returns the normalized URL without a trailing slash.
fn parse_base_url(value: &str, var_name: &str) -> Result<String, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}

/// Destinations are international phone numbers without the leading '+'.
fn validate_destination(value: &str, var_name: &str) -> Result<(), ConfigError> {
    let digits = value.len();
    if !value.chars().all(|c| c.is_ascii_digit())
        || !(MIN_DESTINATION_DIGITS..=MAX_DESTINATION_DIGITS).contains(&digits)
    {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!(
                "must be {MIN_DESTINATION_DIGITS}-{MAX_DESTINATION_DIGITS} digits (got '{value}')"
            ),
        ));
    }
    Ok(())
}

fn parse_separator(value: &str, var_name: &str) -> Result<NumberFormat, ConfigError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(NumberFormat::new(c)),
        _ => Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "must be exactly one character".to_string(),
        )),
    }
}
