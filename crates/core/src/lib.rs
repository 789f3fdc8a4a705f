//! # Salesdash Core
//!
//! Shared building blocks for the Salesdash analytics platform.
//!
//! This crate provides the pieces every Salesdash service depends on:
//! the ledger row model, the error taxonomy, configuration loading, and
//! retry utilities.
//!
//! ## Modules
//!
//! - `config`: Configuration loading and validation
//! - `error`: Error types and handling
//! - `models`: Domain models for the sales ledger
//! - `retry`: Exponential backoff retry utilities

pub mod config;
pub mod error;
pub mod models;
pub mod retry;

// Re-export commonly used types
pub use config::{load_dotenv, ConfigLoader, ServiceConfig, SourceConfig};
pub use error::DashboardError;
pub use models::transaction::{Transaction, REQUIRED_COLUMNS};
pub use retry::{retry_with_backoff, RetryPolicy};

/// Result type alias for Salesdash operations
pub type Result<T> = std::result::Result<T, DashboardError>;
