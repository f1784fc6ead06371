//! Handler tests for the RFP domain
//!
//! Exercise the handler → service → repository stack against a real
//! Postgres container via `tower::oneshot`.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_rfp::*;
use http_body_util::BodyExt;
use serde_json::json;
use test_utils::{TestDatabase, TestDataBuilder};
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn rfp_service(db: &TestDatabase) -> RfpService<PgRfpRepository> {
    RfpService::new(PgRfpRepository::new(db.connection()))
}

#[tokio::test]
async fn test_create_rfp_handler_returns_201() {
    let db = TestDatabase::new().await;
    let app = handlers::router(rfp_service(&db));

    let builder = TestDataBuilder::from_test_name("rfp_create_201");

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "title": builder.name("rfp", "main"),
                "customer": "Acme Corp"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let rfp: Rfp = json_body(response.into_body()).await;
    assert_eq!(rfp.status, RfpStatus::Draft);
    assert!(rfp.equipment.is_empty());
    assert_eq!(rfp.totals, EquipmentTotals::default());
}

#[tokio::test]
async fn test_create_rfp_handler_validates_input() {
    let db = TestDatabase::new().await;
    let app = handlers::router(rfp_service(&db));

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "title": "",
                "customer": "Acme Corp"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_set_equipment_returns_totals_and_persists() {
    let db = TestDatabase::new().await;
    let service = rfp_service(&db);
    let builder = TestDataBuilder::from_test_name("rfp_set_equipment");

    let rfp = service
        .create_rfp(CreateRfp {
            title: builder.name("rfp", "equipment"),
            customer: "Acme Corp".to_string(),
        })
        .await
        .unwrap();

    let app = handlers::router(service.clone());

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/{}/equipment", rfp.id))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "equipment": [
                    {
                        "kind": "product",
                        "description": "Dome camera",
                        "quantity": 1,
                        "unit_price": "100",
                        "margin_percent": "10"
                    },
                    {
                        "kind": "service",
                        "description": "Installation labor",
                        "quantity": 1,
                        "unit_price": "100",
                        "margin_percent": "0"
                    }
                ]
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let totals: EquipmentTotals = json_body(response.into_body()).await;
    assert_eq!(totals.products_total, "110.00".parse().unwrap());
    assert_eq!(totals.services_total, "100.00".parse().unwrap());
    assert_eq!(totals.grand_total, "210.00".parse().unwrap());

    // The snapshot survives a reload
    let reloaded = service.get_rfp(rfp.id).await.unwrap();
    assert_eq!(reloaded.equipment.len(), 2);
    assert_eq!(reloaded.totals.grand_total, "210.00".parse().unwrap());
}

#[tokio::test]
async fn test_set_equipment_rejects_invalid_line_item() {
    let db = TestDatabase::new().await;
    let service = rfp_service(&db);
    let builder = TestDataBuilder::from_test_name("rfp_invalid_line");

    let rfp = service
        .create_rfp(CreateRfp {
            title: builder.name("rfp", "invalid"),
            customer: "Acme Corp".to_string(),
        })
        .await
        .unwrap();

    let app = handlers::router(service);

    // Zero quantity fails validation
    let request = Request::builder()
        .method("PUT")
        .uri(format!("/{}/equipment", rfp.id))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "equipment": [
                    {
                        "kind": "product",
                        "description": "Dome camera",
                        "quantity": 0,
                        "unit_price": "100",
                        "margin_percent": "0"
                    }
                ]
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_set_equipment_unknown_rfp_returns_404() {
    let db = TestDatabase::new().await;
    let app = handlers::router(rfp_service(&db));

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/{}/equipment", uuid::Uuid::now_v7()))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({"equipment": []})).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_rfp_status_transition() {
    let db = TestDatabase::new().await;
    let service = rfp_service(&db);
    let builder = TestDataBuilder::from_test_name("rfp_status");

    let rfp = service
        .create_rfp(CreateRfp {
            title: builder.name("rfp", "status"),
            customer: "Acme Corp".to_string(),
        })
        .await
        .unwrap();

    let app = handlers::router(service);

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/{}", rfp.id))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({"status": "submitted"})).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let updated: Rfp = json_body(response.into_body()).await;
    assert_eq!(updated.status, RfpStatus::Submitted);
}
