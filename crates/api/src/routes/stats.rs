//! Aggregate statistics endpoints
//!
//! `GET /api/v1/stats` returns every chart series the dashboard renders,
//! computed over the filtered view of the current snapshot.
//! `GET /api/v1/top-revenue` lists the largest individual sales.

use crate::routes::{error_response, FilterQuery};
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use salesdash_engine::analytics;
use salesdash_engine::{AbcPoint, SeriesPoint};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize)]
struct DashboardStats {
    snapshot_version: Uuid,
    row_count: usize,
    revenue_total: f64,
    abc_clients: Vec<AbcPoint>,
    abc_products: Vec<AbcPoint>,
    top_clients: Vec<SeriesPoint>,
    top_products: Vec<SeriesPoint>,
    revenue_by_month: Vec<SeriesPoint>,
    quantity_by_month: Vec<SeriesPoint>,
    market_share: Vec<SeriesPoint>,
    state_share: Vec<SeriesPoint>,
}

const TOP_N_CHART: usize = 5;

pub async fn get_stats(
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

    let filtered = filter.apply(&snapshot.transactions);

    HttpResponse::Ok().json(DashboardStats {
        snapshot_version: snapshot.version,
        row_count: filtered.len(),
        revenue_total: analytics::revenue_total(&filtered),
        abc_clients: analytics::abc_curve_by_client(&filtered),
        abc_products: analytics::abc_curve_by_product(&filtered),
        top_clients: analytics::top_clients_by_revenue(&filtered, TOP_N_CHART),
        top_products: analytics::top_products_by_quantity(&filtered, TOP_N_CHART),
        revenue_by_month: analytics::revenue_by_month(&filtered),
        quantity_by_month: analytics::quantity_by_month(&filtered),
        market_share: analytics::revenue_share_by_market(&filtered),
        state_share: analytics::revenue_share_by_state(&filtered),
    })
}

#[derive(Debug, Deserialize)]
pub struct TopRevenueQuery {
    /// Maximum number of rows to return (default 30)
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
struct TopRevenueResponse {
    snapshot_version: Uuid,
    rows: Vec<SeriesPoint>,
}

const DEFAULT_TOP_REVENUE_LIMIT: usize = 30;

pub async fn get_top_revenue(
    query: web::Query<TopRevenueQuery>,
    state: web::Data<AppState>,
) -> impl Responder {
    let limit = query.limit.unwrap_or(DEFAULT_TOP_REVENUE_LIMIT);

    let snapshot = match state.store.current().await {
        Ok(snapshot) => snapshot,
        Err(e) => return error_response(&e),
    };

    HttpResponse::Ok().json(TopRevenueResponse {
        snapshot_version: snapshot.version,
        rows: analytics::top_revenue_rows(&snapshot.transactions, limit),
    })
}
