//! Domain models for the Salesdash platform

pub mod transaction;

pub use transaction::{Transaction, REQUIRED_COLUMNS};
