//! Recommendation endpoint
//!
//! `GET /api/v1/recommendations/{client}?top_n=5`
//!
//! Clients and products travel as their original labels; internal dense
//! indices never appear in a response.

use crate::routes::error_response;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use salesdash_engine::{Recommendation, DEFAULT_TOP_N};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct RecommendationsQuery {
    /// Maximum number of products to return (default 5)
    pub top_n: Option<usize>,
}

#[derive(Debug, Serialize)]
struct RecommendationsResponse {
    client: String,
    snapshot_version: Uuid,
    generated_at: DateTime<Utc>,
    recommendations: Vec<Recommendation>,
}

pub async fn get_recommendations(
    path: web::Path<String>,
    query: web::Query<RecommendationsQuery>,
    state: web::Data<AppState>,
) -> impl Responder {
    let client = path.into_inner();
    let top_n = query.top_n.unwrap_or(DEFAULT_TOP_N);

    let snapshot = match state.store.current().await {
        Ok(snapshot) => snapshot,
        Err(e) => return error_response(&e),
    };

    match snapshot.recommendations(&client, top_n) {
        Ok(recommendations) => HttpResponse::Ok().json(RecommendationsResponse {
            client,
            snapshot_version: snapshot.version,
            generated_at: Utc::now(),
            recommendations,
        }),
        Err(e) => error_response(&e),
    }
}
