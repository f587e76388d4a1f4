//! Error types raised at the boundaries of the pricing engine
//!
//! Pricing itself never fails; these cover loading catalogs and accepting
//! selection input from a host.

use rust_decimal::Decimal;
use std::path::PathBuf;
use thiserror::Error;

/// Failure reading or writing a persisted catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read or written
    #[error("catalog file {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The catalog JSON does not match the catalog shape
    #[error("catalog file {path} is malformed: {source}")]
    Parse {
        /// File involved
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// The catalog could not be serialized
    #[error("failed to serialize catalog: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Invalid selection input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// Quantity outside the accepted range
    #[error("quantity {quantity} is outside the accepted range 1..={max}")]
    QuantityOutOfRange {
        /// Rejected quantity
        quantity: u32,
        /// Configured maximum
        max: u32,
    },

    /// An assignment was not of the form `KEY=VALUE`
    #[error("expected KEY=VALUE, got '{0}'")]
    MalformedAssignment(String),

    /// A manual override is negative or above the accepted maximum
    #[error("manual amount {amount} for {phase_id}.{line_id} is outside 0..={max}")]
    ManualAmountOutOfRange {
        /// Phase the override belongs to
        phase_id: String,
        /// Line the override belongs to
        line_id: String,
        /// Rejected amount
        amount: Decimal,
        /// Accepted maximum
        max: Decimal,
    },

    /// A line key was not of the form `PHASE.LINE`
    #[error("expected PHASE.LINE, got '{0}'")]
    MalformedLineKey(String),

    /// The value part of an assignment could not be parsed
    #[error("invalid value '{value}' for '{key}'")]
    InvalidValue {
        /// Key the value was assigned to
        key: String,
        /// Rejected value
        value: String,
    },

    /// A selection file could not be read or parsed
    #[error("selection file {path}: {message}")]
    File {
        /// File involved
        path: PathBuf,
        /// What went wrong
        message: String,
    },
}
