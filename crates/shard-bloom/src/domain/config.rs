//! Filter configuration and validation
//!
//! # Example
//!
//! ```
//! use shard_bloom::FilterConfigBuilder;
//!
//! let config = FilterConfigBuilder::new()
//!     .capacity(1_000_000)
//!     .error_rate(0.001)
//!     .build()
//!     .expect("Valid config");
//! assert_eq!(config.capacity, 1_000_000);
//! ```

use serde::{Deserialize, Serialize};

use super::parameters::{check_capacity, check_error_rate, Geometry};
use crate::error::FilterError;

/// Requested filter size
///
/// `error_rate: None` derives the rate from the capacity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Anticipated number of distinct items (at least 1)
    pub capacity: i64,
    /// Target false positive rate, strictly between 0 and 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_rate: Option<f64>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            capacity: 1_000_000,
            error_rate: Some(0.001),
        }
    }
}

impl FilterConfig {
    /// Create a new configuration with validation
    pub fn new(capacity: i64, error_rate: Option<f64>) -> Result<Self, FilterError> {
        let config = Self {
            capacity,
            error_rate,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values the sizer would reject, without computing geometry
    pub fn validate(&self) -> Result<(), FilterError> {
        check_capacity(self.capacity)?;
        if let Some(error_rate) = self.error_rate {
            check_error_rate(error_rate)?;
        }
        Ok(())
    }

    /// Size the filter; fails with the same range errors as `validate`
    pub fn geometry(&self) -> Result<Geometry, FilterError> {
        Geometry::compute(self.capacity, self.error_rate)
    }

    /// Builder-style method to set capacity
    pub fn with_capacity(mut self, capacity: i64) -> Self {
        self.capacity = capacity;
        self
    }

    /// Builder-style method to set the error rate
    pub fn with_error_rate(mut self, error_rate: f64) -> Self {
        self.error_rate = Some(error_rate);
        self
    }
}

/// Builder for FilterConfig with validation
#[derive(Default)]
pub struct FilterConfigBuilder {
    capacity: Option<i64>,
    error_rate: Option<f64>,
    derive_error_rate: bool,
}

impl FilterConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the anticipated number of items
    pub fn capacity(mut self, capacity: i64) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Set the target false positive rate
    pub fn error_rate(mut self, error_rate: f64) -> Self {
        self.error_rate = Some(error_rate);
        self.derive_error_rate = false;
        self
    }

    /// Derive the error rate from the capacity instead
    pub fn derived_error_rate(mut self) -> Self {
        self.error_rate = None;
        self.derive_error_rate = true;
        self
    }

    /// Build the FilterConfig, validating all parameters
    pub fn build(self) -> Result<FilterConfig, FilterError> {
        let config = self.build_unchecked();
        config.validate()?;
        Ok(config)
    }

    /// Build without validation (for internal use only)
    pub fn build_unchecked(self) -> FilterConfig {
        let defaults = FilterConfig::default();

        FilterConfig {
            capacity: self.capacity.unwrap_or(defaults.capacity),
            error_rate: if self.derive_error_rate {
                None
            } else {
                self.error_rate.or(defaults.error_rate)
            },
        }
    }
}
