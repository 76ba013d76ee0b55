//! Store configuration.
//!
//! # Example
//!
//! ```
//! use statecraft_runtime::config::StoreConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StoreConfig::default().with_broadcast_capacity(256);
//! config.validate()?;
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// Environment variable overriding the transition broadcast capacity
pub const BROADCAST_CAPACITY_ENV: &str = "STATECRAFT_BROADCAST_CAPACITY";

/// Default number of transitions buffered per listener
pub const DEFAULT_BROADCAST_CAPACITY: usize = 16;

// tokio's broadcast channel refuses larger capacities
const MAX_BROADCAST_CAPACITY: usize = usize::MAX / 2;

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable held a value that could not be parsed
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue {
        /// Variable name
        key: String,
        /// Raw value found
        value: String,
    },

    /// A parsed value is outside its allowed range
    #[error("Configuration validation failed: {0}")]
    Validation(String),
}

/// Configuration for Store instances
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Transitions buffered for each listener before it starts lagging
    pub broadcast_capacity: usize,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(broadcast_capacity: usize) -> Self {
        Self { broadcast_capacity }
    }

    /// Set the broadcast capacity
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = capacity;
        self
    }

    /// Load configuration from the environment
    ///
    /// Reads [`BROADCAST_CAPACITY_ENV`]; unset means the default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the variable is not a valid capacity.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a value is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(BROADCAST_CAPACITY_ENV) {
            config.broadcast_capacity = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: BROADCAST_CAPACITY_ENV.to_string(),
                value: raw.clone(),
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if the capacity is zero or too large.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.broadcast_capacity == 0 {
            return Err(ConfigError::Validation(
                "broadcast_capacity must be > 0".to_string(),
            ));
        }
        if self.broadcast_capacity > MAX_BROADCAST_CAPACITY {
            return Err(ConfigError::Validation(format!(
                "broadcast_capacity must be <= {MAX_BROADCAST_CAPACITY}"
            )));
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            broadcast_capacity: DEFAULT_BROADCAST_CAPACITY,
        }
    }
}
