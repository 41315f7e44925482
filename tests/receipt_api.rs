use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use receipt_points::receipt_router;
use receipt_points::receipts::{InMemoryPointsStore, ReceiptService};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;

fn router() -> Router {
    let store = Arc::new(InMemoryPointsStore::default());
    receipt_router(Arc::new(ReceiptService::new(store)))
}

fn post_receipt(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/receipts/process")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .expect("request builds")
}

fn get_points(id: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(format!("/receipts/{id}/points"))
        .body(Body::empty())
        .expect("request builds")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("body is json")
}

fn target_receipt() -> Value {
    json!({
        "retailer": "Target",
        "purchaseDate": "2022-01-01",
        "purchaseTime": "13:01",
        "items": [
            { "shortDescription": "Emils Cheese Pizza", "price": "12.25" },
            { "shortDescription": "Klarbrunn 12-PK 12 FL OZ", "price": "8.10" }
        ],
        "total": "35.35"
    })
}

#[tokio::test]
async fn submit_then_lookup_round_trips_the_score() {
    let app = router();

    let response = app
        .clone()
        .oneshot(post_receipt(target_receipt().to_string()))
        .await
        .expect("request routes");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let id = body["id"].as_str().expect("id returned").to_string();
    assert!(!id.is_empty());

    let response = app
        .oneshot(get_points(&id))
        .await
        .expect("request routes");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["points"], json!(22));
}

#[tokio::test]
async fn quarter_multiple_afternoon_receipt_scores_one_hundred_nine() {
    let app = router();
    let receipt = json!({
        "retailer": "M&M Corner Market",
        "purchaseDate": "2022-03-20",
        "purchaseTime": "14:33",
        "items": [
            { "shortDescription": "Gatorade", "price": "2.25" },
            { "shortDescription": "Gatorade", "price": "2.25" },
            { "shortDescription": "Gatorade", "price": "2.25" },
            { "shortDescription": "Gatorade", "price": "2.25" }
        ],
        "total": "9.00"
    });

    let response = app
        .clone()
        .oneshot(post_receipt(receipt.to_string()))
        .await
        .expect("request routes");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let id = body["id"].as_str().expect("id returned").to_string();

    let body = body_json(app.oneshot(get_points(&id)).await.expect("request routes")).await;
    assert_eq!(body["points"], json!(109));
}

#[tokio::test]
async fn malformed_json_body_gets_the_uniform_invalid_input_response() {
    let response = router()
        .oneshot(post_receipt("{not json".to_string()))
        .await
        .expect("request routes");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], json!("Please verify input."));
}

#[tokio::test]
async fn missing_field_gets_the_uniform_invalid_input_response() {
    let mut receipt = target_receipt();
    receipt.as_object_mut().expect("object").remove("total");

    let response = router()
        .oneshot(post_receipt(receipt.to_string()))
        .await
        .expect("request routes");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], json!("Please verify input."));
}

#[tokio::test]
async fn semantically_invalid_receipt_gets_the_same_response_as_a_malformed_one() {
    let mut receipt = target_receipt();
    receipt["items"] = json!([]);

    let response = router()
        .oneshot(post_receipt(receipt.to_string()))
        .await
        .expect("request routes");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], json!("Please verify input."));
}

#[tokio::test]
async fn unknown_identifier_returns_not_found_every_time() {
    let app = router();
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(get_points("adb6b560-0eef-42bc-9d16-df48f30e89b2"))
            .await
            .expect("request routes");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"], json!("No receipt found for that ID."));
    }
}
