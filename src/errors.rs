//! Shared error types used across submodules.

use thiserror::Error;

use crate::tissue::TissueDataError;

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, DosimetryError>;

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum DosimetryError {
    /// Wraps failures reading or parsing the tissue property source.
    #[error(transparent)]
    TissueData(#[from] TissueDataError),
    /// Raised for unsupported names or malformed arguments.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Raised when a value falls outside the band a component supports.
    #[error("{quantity} {value} outside supported range [{min}, {max}]")]
    OutOfRange {
        /// Name of the offending quantity.
        quantity: &'static str,
        /// Value that was supplied.
        value: f64,
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },
    /// Raised when no stored record matches a tissue and frequency exactly.
    #[error("no record for tissue '{tissue}' at {frequency_hz} Hz")]
    NotFound {
        /// Canonical tissue identifier.
        tissue: String,
        /// Requested frequency in hertz.
        frequency_hz: f64,
    },
    /// Raised when a scenario configuration is unreadable or inconsistent.
    #[error("configuration error: {0}")]
    Config(String),
    /// Raised when a computation would produce a non-finite value.
    #[error("numeric error: {0}")]
    Numeric(String),
}

impl DosimetryError {
    /// Builds an [`DosimetryError::OutOfRange`] for a frequency outside `band`.
    #[must_use]
    pub fn frequency_out_of_range(value: f64, band: (f64, f64)) -> Self {
        Self::OutOfRange {
            quantity: "frequency (Hz)",
            value,
            min: band.0,
            max: band.1,
        }
    }
}
