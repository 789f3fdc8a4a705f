//! Salesdash API - HTTP surface for the sales analytics dashboard
//!
//! Serves recommendations, aggregate chart series, filtered table
//! views, and the spreadsheet export over one TTL-cached ledger
//! snapshot store.

use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer};
use salesdash_api::routes;
use salesdash_api::state::AppState;
use salesdash_core::{load_dotenv, ConfigLoader, ServiceConfig, SourceConfig};
use salesdash_engine::{source, SnapshotStore};
use std::sync::Arc;
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let service_config = ServiceConfig::from_env()?;
    service_config.validate()?;

    let source_config = SourceConfig::from_env()?;
    source_config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&service_config.log_level)),
        )
        .json()
        .init();

    info!("Starting Salesdash API");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Snapshot TTL: {:?}", source_config.ttl);

    let ledger_source = source::from_config(&source_config)?;
    let state = AppState {
        store: Arc::new(SnapshotStore::new(ledger_source, source_config.ttl)),
    };

    let bind_addr = format!("{}:{}", service_config.host, service_config.port);
    info!("Binding to {}", bind_addr);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(cors)
            .route("/health", web::get().to(health_check))
            .configure(routes::configure)
    })
    .workers(service_config.workers)
    .bind(bind_addr)?
    .run()
    .await?;

    Ok(())
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "salesdash-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
