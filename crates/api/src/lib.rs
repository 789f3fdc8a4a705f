//! Salesdash API - HTTP surface for the sales analytics dashboard
//!
//! Exposes the engine's boundaries over HTTP: per-client product
//! recommendations, aggregate chart series, filtered table views, and
//! the spreadsheet export.

pub mod routes;
pub mod state;
