//! Error types for routing and chart configuration

use thiserror::Error;

/// Errors raised while registering routes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// Templates must be absolute paths
    #[error("Route template '{0}' must start with '/'")]
    NotAbsolute(String),

    /// A `:` segment without a usable name
    #[error("Route template '{template}' has an invalid parameter '{segment}'")]
    InvalidParameter { template: String, segment: String },

    /// The same parameter name appears twice
    #[error("Route template '{template}' repeats parameter '{name}'")]
    DuplicateParameter { template: String, name: String },

    #[error("Route template '{template}' failed to compile: {detail}")]
    Compile { template: String, detail: String },
}

/// Errors raised while validating chart data
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    /// Charts are mounted into a canvas with a non-empty id
    #[error("{chart} requires a container id")]
    MissingContainer { chart: &'static str },

    /// Labels and values differ in length
    #[error("{labels} and {values} arrays must have the same length")]
    LengthMismatch {
        labels: &'static str,
        values: &'static str,
    },

    /// A percentage outside 0..=100
    #[error("All attendance percentages must be between 0 and 100 (got {value} at index {index})")]
    PercentageOutOfRange { index: usize, value: f64 },

    /// A count that is negative, fractional or beyond `u64`
    #[error("All student counts must be non-negative integers (got {value} at index {index})")]
    InvalidCount { index: usize, value: f64 },
}

pub type RouterResult<T> = std::result::Result<T, RouterError>;

pub type ChartResult<T> = std::result::Result<T, ChartError>;
