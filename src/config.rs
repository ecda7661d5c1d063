//! Runtime configuration, read from the environment.

use std::path::PathBuf;
use std::str::FromStr;
use crate::error::ConfigError;

pub const DEFAULT_STORAGE_KEY: &str = "@storefront:cart";
pub const DEFAULT_BUFFER_SIZE: usize = 32;

#[derive(Debug, Clone, PartialEq)]
pub struct CartConfig {
    /// Key the serialized cart is stored under.
    pub storage_key: String,
    /// Directory for file-backed storage. `None` keeps the cart in memory.
    pub storage_dir: Option<PathBuf>,
    /// Base URL of a remote inventory API. `None` runs the in-process inventory.
    pub inventory_url: Option<String>,
    /// Mailbox capacity of each actor.
    pub buffer_size: usize,
    /// Reject the first add of a product whose stock is below 1.
    pub check_stock_on_first_add: bool,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage_dir: None,
            inventory_url: None,
            buffer_size: DEFAULT_BUFFER_SIZE,
            check_stock_on_first_add: false,
        }
    }
}

impl CartConfig {
    /// Reads `CART_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let buffer_size = match non_empty("CART_BUFFER_SIZE") {
            Some(raw) => match parse::<usize>("CART_BUFFER_SIZE", &raw)? {
                0 => return Err(invalid("CART_BUFFER_SIZE", &raw)),
                n => n,
            },
            None => defaults.buffer_size,
        };

        let check_stock_on_first_add = match non_empty("CART_CHECK_STOCK_ON_FIRST_ADD") {
            Some(raw) => parse_bool("CART_CHECK_STOCK_ON_FIRST_ADD", &raw)?,
            None => defaults.check_stock_on_first_add,
        };

        Ok(Self {
            storage_key: non_empty("CART_STORAGE_KEY").unwrap_or(defaults.storage_key),
            storage_dir: non_empty("CART_STORAGE_DIR").map(PathBuf::from),
            inventory_url: non_empty("CART_INVENTORY_URL"),
            buffer_size,
            check_stock_on_first_add,
        })
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::Invalid {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse<T: FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| invalid(key, raw))
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, raw)),
    }
}
