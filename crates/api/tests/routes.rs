//! Integration tests for the HTTP surface
//!
//! Spins the route tree up against a file-backed ledger source and
//! exercises each endpoint end-to-end.

use actix_web::{test, web, App};
use salesdash_api::routes;
use salesdash_api::state::AppState;
use salesdash_engine::{CsvFileSource, SnapshotStore};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

const LEDGER: &str = "\
CLIENTE,PRODUTO,TIPO DE PRODUTO,SEGMENTO,MERCADO,UF,PAÍS,MUNICÍPIO,CONTINENTE,ICMS,ORIGEM DO PRODUTO,DATA,FATURAMENTO,QUANTIDADE,ABC CLIENTE,ABC PRODUTO,MÊS
CLIENT1,PROD-A,CAIXA,VAREJO,INTERNO,SP,BRASIL,CAMPINAS,AMÉRICA DO SUL,DENTRO DO ESTADO,NACIONAL,2024-01-15,100.0,1,A,A,Janeiro
CLIENT1,PROD-C,CAIXA,VAREJO,INTERNO,SP,BRASIL,CAMPINAS,AMÉRICA DO SUL,DENTRO DO ESTADO,NACIONAL,2024-01-16,50.0,2,A,A,Janeiro
CLIENT2,PROD-B,BOBINA,VAREJO,EXTERNO,RJ,BRASIL,NITERÓI,AMÉRICA DO SUL,FORA DO ESTADO,NACIONAL,2024-02-01,100.0,3,B,A,Fevereiro
CLIENT2,PROD-C,CAIXA,VAREJO,EXTERNO,RJ,BRASIL,NITERÓI,AMÉRICA DO SUL,FORA DO ESTADO,NACIONAL,2024-02-02,50.0,1,B,A,Fevereiro
CLIENT3,PROD-A,CAIXA,VAREJO,INTERNO,SP,BRASIL,CAMPINAS,AMÉRICA DO SUL,DENTRO DO ESTADO,NACIONAL,2024-03-10,80.0,4,C,A,Março
";

fn test_state() -> (AppState, tempfile::NamedTempFile) {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(LEDGER.as_bytes()).unwrap();

    let source = Arc::new(CsvFileSource::new(file.path()));
    let state = AppState {
        store: Arc::new(SnapshotStore::new(source, Duration::from_secs(60))),
    };

    (state, file)
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(routes::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn recommendations_rank_co_purchased_product_first() {
    let (state, _file) = test_state();
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/v1/recommendations/CLIENT3?top_n=5")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["client"], "CLIENT3");
    assert_eq!(body["recommendations"][0]["product"], "PROD-C");
    assert!(body["recommendations"][0]["score"].as_f64().unwrap() > 0.0);
}

#[actix_web::test]
async fn recommendations_respect_top_n() {
    let (state, _file) = test_state();
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/v1/recommendations/CLIENT3?top_n=1")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["recommendations"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn unknown_client_is_a_404_with_the_label_in_the_message() {
    let (state, _file) = test_state();
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/v1/recommendations/NOBODY")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 404);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("NOBODY"));
}

#[actix_web::test]
async fn stats_cover_the_whole_ledger_by_default() {
    let (state, _file) = test_state();
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/api/v1/stats").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["row_count"], 5);
    assert_eq!(body["revenue_total"], 380.0);
    assert_eq!(body["revenue_by_month"][0]["label"], "Janeiro");
    assert_eq!(body["abc_clients"][0]["label"], "CLIENT1");
}

#[actix_web::test]
async fn stats_apply_filters() {
    let (state, _file) = test_state();
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/v1/stats?markets=INTERNO")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["row_count"], 3);
    assert_eq!(body["revenue_total"], 230.0);
}

#[actix_web::test]
async fn inverted_revenue_range_is_a_400() {
    let (state, _file) = test_state();
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/v1/stats?min_revenue=100&max_revenue=1")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn table_returns_filtered_rows() {
    let (state, _file) = test_state();
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/v1/table?clients=CLIENT2")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["row_count"], 2);
    assert_eq!(body["rows"][0]["CLIENTE"], "CLIENT2");
}

#[actix_web::test]
async fn top_revenue_lists_largest_sales_first() {
    let (state, _file) = test_state();
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/v1/top-revenue?limit=2")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["value"], 100.0);
}

#[actix_web::test]
async fn export_returns_an_xlsx_attachment() {
    let (state, _file) = test_state();
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/v1/export?filename=ledger")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert!(resp
        .headers()
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .contains("ledger.xlsx"));

    let body = test::read_body(resp).await;
    assert_eq!(&body[0..2], b"PK");
}
