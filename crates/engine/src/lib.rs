//! Salesdash Analytics and Recommendation Engine
//!
//! This crate turns one snapshot of the sales ledger into everything the
//! dashboard serves: the client × product interaction matrix, the
//! item-item similarity matrix, per-client product recommendations, the
//! aggregate chart series, filtered table views, and the spreadsheet
//! export.
//!
//! Snapshots are immutable and versioned: a rebuild produces a whole new
//! `Snapshot`, and every query works off one consistent capture.

pub mod analytics;
pub mod encoding;
pub mod export;
pub mod filter;
pub mod interaction;
pub mod scoring;
pub mod similarity;
pub mod snapshot;
pub mod source;

// Re-export key types
pub use analytics::{AbcPoint, SeriesPoint};
pub use encoding::LabelIndex;
pub use export::export_workbook;
pub use filter::TransactionFilter;
pub use interaction::InteractionMatrix;
pub use scoring::score_client;
pub use similarity::SimilarityMatrix;
pub use snapshot::{Recommendation, Snapshot, SnapshotStore};
pub use source::{CsvFileSource, DataSource, HttpCsvSource};

/// Default number of recommendations returned per query
pub const DEFAULT_TOP_N: usize = 5;
