//! Route registration and shared helpers

use actix_web::{web, HttpResponse};
use salesdash_core::DashboardError;

pub mod export;
pub mod query;
pub mod recommendations;
pub mod stats;
pub mod table;

pub use query::FilterQuery;

/// Register all API routes under `/api/v1`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route(
                "/recommendations/{client}",
                web::get().to(recommendations::get_recommendations),
            )
            .route("/stats", web::get().to(stats::get_stats))
            .route("/top-revenue", web::get().to(stats::get_top_revenue))
            .route("/table", web::get().to(table::get_table))
            .route("/export", web::get().to(export::get_export)),
    );
}

/// Map an engine error onto an HTTP response with a JSON error body
///
/// The named dataset errors keep their message intact so callers see
/// which client or column was at fault.
pub(crate) fn error_response(err: &DashboardError) -> HttpResponse {
    let body = serde_json::json!({ "error": err.to_string() });

    match err {
        DashboardError::UnknownClient { .. } => HttpResponse::NotFound().json(body),
        DashboardError::Validation { .. } => HttpResponse::BadRequest().json(body),
        DashboardError::EmptyDataset { .. }
        | DashboardError::MissingColumn { .. }
        | DashboardError::Source { .. } => HttpResponse::BadGateway().json(body),
        DashboardError::ConfigurationError { .. } | DashboardError::Export { .. } => {
            HttpResponse::InternalServerError().json(body)
        }
    }
}
