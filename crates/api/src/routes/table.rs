//! Filtered table endpoint
//!
//! `GET /api/v1/table` returns the filtered view of the transaction
//! table, same shape as the ledger.

use crate::routes::{error_response, FilterQuery};
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use salesdash_core::Transaction;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
struct TableResponse {
    snapshot_version: Uuid,
    row_count: usize,
    rows: Vec<Transaction>,
}

pub async fn get_table(
    query: web::Query<FilterQuery>,
    state: web::Data<AppState>,
) -> impl Responder {
    let filter = match query.into_inner().into_filter() {
        Ok(filter) => filter,
        Err(e) => return error_response(&e),
    };

    let snapshot = match state.store.current().await {
        Ok(snapshot) => snapshot,
        Err(e) => return error_response(&e),
    };

    let rows = filter.apply(&snapshot.transactions);

    HttpResponse::Ok().json(TableResponse {
        snapshot_version: snapshot.version,
        row_count: rows.len(),
        rows,
    })
}
