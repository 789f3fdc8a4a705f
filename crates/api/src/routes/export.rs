//! Spreadsheet export endpoint
//!
//! `GET /api/v1/export?filename=ledger` streams the full ledger as a
//! styled xlsx attachment.

use crate::routes::error_response;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use salesdash_engine::export_workbook;
use serde::Deserialize;

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const DEFAULT_FILENAME: &str = "sales-ledger";

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    /// Download filename without extension (default "sales-ledger")
    pub filename: Option<String>,
}

pub async fn get_export(
    query: web::Query<ExportQuery>,
    state: web::Data<AppState>,
) -> impl Responder {
    let snapshot = match state.store.current().await {
        Ok(snapshot) => snapshot,
        Err(e) => return error_response(&e),
    };

    let blob = match export_workbook(&snapshot.transactions) {
        Ok(blob) => blob,
        Err(e) => return error_response(&e),
    };

    let filename = query
        .filename
        .as_deref()
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_FILENAME);

    HttpResponse::Ok()
        .content_type(XLSX_MIME)
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}.xlsx\"", filename),
        ))
        .body(blob)
}
