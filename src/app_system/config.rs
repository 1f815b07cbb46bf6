use std::path::PathBuf;

use thiserror::Error;

use crate::storage::CART_STORAGE_KEY;

pub const DEFAULT_STORAGE_DIR: &str = ".cart";
pub const DEFAULT_BUFFER_SIZE: usize = 32;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid {name}: {value:?} (expected a positive integer)")]
    InvalidNumber { name: &'static str, value: String },
    #[error("Empty {0}")]
    Empty(&'static str),
}

/// Runtime settings for the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartConfig {
    /// Key the cart blob is stored under.
    pub storage_key: String,
    /// Directory used by [`FileStorage`](crate::storage::FileStorage).
    pub storage_dir: PathBuf,
    /// Capacity of the cart actor's mailbox.
    pub buffer_size: usize,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: CART_STORAGE_KEY.to_string(),
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl CartConfig {
    /// Reads `CART_STORAGE_KEY`, `CART_STORAGE_DIR` and `CART_BUFFER_SIZE`,
    /// falling back to the defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(key) = lookup("CART_STORAGE_KEY") {
            if key.trim().is_empty() {
                return Err(ConfigError::Empty("CART_STORAGE_KEY"));
            }
            config.storage_key = key;
        }
        if let Some(dir) = lookup("CART_STORAGE_DIR") {
            if dir.trim().is_empty() {
                return Err(ConfigError::Empty("CART_STORAGE_DIR"));
            }
            config.storage_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup("CART_BUFFER_SIZE") {
            config.buffer_size = match raw.trim().parse::<usize>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        name: "CART_BUFFER_SIZE",
                        value: raw,
                    })
                }
            };
        }

        Ok(config)
    }
}
