//! Error types for the Salesdash platform
//!
//! A single taxonomy shared across crates. The named dataset errors
//! (`EmptyDataset`, `MissingColumn`, `UnknownClient`) carry enough
//! context to surface an actionable message to the user; configuration
//! and source errors keep the offending key or detail alongside.

use thiserror::Error;

/// Errors produced by Salesdash services
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The source table had zero rows, so no matrix can be built
    #[error("dataset is empty: {context}")]
    EmptyDataset {
        /// What was being built when the empty table was encountered
        context: String,
    },

    /// A required column is absent from the source table
    #[error("required column '{column}' is missing from the source table")]
    MissingColumn {
        /// Name of the missing column
        column: String,
    },

    /// A client label is not present in the current snapshot's mapping
    #[error("client '{label}' is not present in the current snapshot")]
    UnknownClient {
        /// The label that failed to resolve
        label: String,
    },

    /// Configuration loading or validation failed
    #[error("configuration error: {message}")]
    ConfigurationError {
        /// Human-readable description of the problem
        message: String,
        /// The environment variable or config key involved, if known
        key: Option<String>,
    },

    /// A caller-supplied value failed validation
    #[error("invalid {field}: {message}")]
    Validation {
        /// Description of the violated constraint
        message: String,
        /// The field or parameter that failed
        field: String,
    },

    /// Fetching or parsing the source table failed
    #[error("data source error: {message}")]
    Source {
        /// Underlying failure detail
        message: String,
    },

    /// Spreadsheet serialization failed
    #[error("spreadsheet export failed: {message}")]
    Export {
        /// Underlying failure detail
        message: String,
    },
}

impl DashboardError {
    /// Create an `EmptyDataset` error with context
    pub fn empty_dataset(context: impl Into<String>) -> Self {
        Self::EmptyDataset {
            context: context.into(),
        }
    }

    /// Create a `MissingColumn` error for the given column
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    /// Create an `UnknownClient` error for the given label
    pub fn unknown_client(label: impl Into<String>) -> Self {
        Self::UnknownClient {
            label: label.into(),
        }
    }

    /// Create a `Validation` error for a named field
    pub fn validation(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: field.into(),
        }
    }

    /// Create a `Source` error
    pub fn source(message: impl Into<String>) -> Self {
        Self::Source {
            message: message.into(),
        }
    }

    /// Create an `Export` error
    pub fn export(message: impl Into<String>) -> Self {
        Self::Export {
            message: message.into(),
        }
    }
}
