use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use axum_products_api::{
    app::build_app, config::AppConfig, repository::InMemoryProductRepository, state::AppState,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

fn app(docs_enabled: bool) -> Router {
    let config = AppConfig {
        database_url: String::new(),
        host: "127.0.0.1".into(),
        port: 0,
        docs_enabled,
    };
    build_app(AppState::new(InMemoryProductRepository::new()), &config)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &Router, name: &str, price: f64) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/api/products",
        Some(json!({ "name": name, "price": price })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"].clone()
}

fn messages(body: &Value) -> Vec<String> {
    body["data"]["errors"]
        .as_array()
        .expect("error list")
        .iter()
        .map(|e| e["message"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn create_returns_created_product_with_availability() {
    let app = app(false);
    let product = create(&app, "Monitor", 300.0).await;

    assert_eq!(product["name"], "Monitor");
    assert_eq!(product["price"], 300.0);
    assert_eq!(product["availability"], true);
    assert!(product["id"].is_i64());
}

#[tokio::test]
async fn create_accepts_numeric_string_price() {
    let app = app(false);
    let (status, body) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({ "name": "Cable", "price": "9.5" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["price"], 9.5);
}

#[tokio::test]
async fn get_unknown_id_is_not_found() {
    let app = app(false);
    let (status, body) = send(&app, "GET", "/api/products/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["data"]["error"], "Product not found");
}

#[tokio::test]
async fn non_integer_id_is_rejected_on_every_route() {
    let app = app(false);
    for method in ["GET", "PATCH", "DELETE"] {
        let (status, body) = send(&app, method, "/api/products/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{method}");
        assert_eq!(messages(&body), ["Invalid id"]);
        assert_eq!(body["data"]["errors"][0]["location"], "params");
    }
}

#[tokio::test]
async fn get_by_id_returns_full_record() {
    let app = app(false);
    let created = create(&app, "Monitor", 300.0).await;
    let uri = format!("/api/products/{}", created["id"]);

    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Monitor");
    assert!(body["data"].get("created_at").is_some());
    assert!(body["data"].get("updated_at").is_some());
}

#[tokio::test]
async fn patch_flips_availability_each_call() {
    let app = app(false);
    let created = create(&app, "Monitor", 300.0).await;
    let uri = format!("/api/products/{}", created["id"]);

    let (status, body) = send(&app, "PATCH", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["availability"], false);

    let (_, body) = send(&app, "PATCH", &uri, None).await;
    assert_eq!(body["data"]["availability"], true);
}

#[tokio::test]
async fn invalid_post_is_rejected_without_creating_rows() {
    let app = app(false);

    let (status, body) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({ "name": "Monitor", "price": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(messages(&body), ["Invalid value"]);

    let (status, body) = send(&app, "POST", "/api/products", Some(json!({ "price": -5 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        messages(&body),
        ["Product name must not be empty", "Invalid value"]
    );

    let (status, body) = send(&app, "POST", "/api/products", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        messages(&body),
        [
            "Product name must not be empty",
            "Invalid value",
            "Product price must not be empty",
            "Invalid value"
        ]
    );

    let (_, body) = send(&app, "GET", "/api/products", None).await;
    assert_eq!(body["data"], json!([]));
}

async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    content_type: Option<&str>,
    body: &'static str,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    let response = app
        .clone()
        .oneshot(builder.body(Body::from(body)).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn malformed_json_is_a_validation_error() {
    let app = app(false);
    let (status, body) = send_raw(
        &app,
        "POST",
        "/api/products",
        Some("application/json"),
        "{not json",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(messages(&body), ["Request body must be valid JSON"]);
}

#[tokio::test]
async fn malformed_json_still_reports_bad_id() {
    let app = app(false);
    let (status, body) = send_raw(
        &app,
        "PUT",
        "/api/products/x",
        Some("application/json"),
        "{not json",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        messages(&body),
        ["Invalid id", "Request body must be valid JSON"]
    );
}

#[tokio::test]
async fn body_without_json_content_type_is_read_as_empty() {
    let app = app(false);
    let (status, body) = send_raw(
        &app,
        "POST",
        "/api/products",
        None,
        r#"{"name":"Monitor","price":300}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        messages(&body),
        [
            "Product name must not be empty",
            "Invalid value",
            "Product price must not be empty",
            "Invalid value"
        ]
    );

    let (status, _) = send_raw(
        &app,
        "POST",
        "/api/products",
        Some("text/plain"),
        r#"{"name":"Monitor","price":300}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, "GET", "/api/products", None).await;
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn non_scalar_names_are_rejected() {
    let app = app(false);
    for name in [json!([]), json!(["Monitor"]), json!({ "text": "Monitor" })] {
        let (status, body) = send(
            &app,
            "POST",
            "/api/products",
            Some(json!({ "name": name.clone(), "price": 300 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{name}");
        assert_eq!(messages(&body), ["Product name must not be empty"]);
    }

    let created = create(&app, "Monitor", 300.0).await;
    let uri = format!("/api/products/{}", created["id"]);
    let (status, body) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({ "name": [], "price": 300, "availability": true })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(messages(&body), ["Product name must not be empty"]);
}

#[tokio::test]
async fn scalar_names_are_stored_as_text() {
    let app = app(false);
    let (status, body) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({ "name": 5, "price": 300 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["name"], "5");

    let uri = format!("/api/products/{}", body["data"]["id"]);
    let (status, body) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({ "name": true, "price": 300, "availability": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "true");
}

#[tokio::test]
async fn create_honours_client_availability() {
    let app = app(false);
    let (status, body) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({ "name": "Monitor", "price": 300, "availability": false })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["availability"], false);

    let (status, body) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({ "name": "Monitor", "price": 300, "availability": "0" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["availability"], false);

    let (status, body) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({ "name": "Monitor", "price": 300, "availability": "maybe" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(messages(&body), ["Invalid availability value"]);
}

#[tokio::test]
async fn long_names_are_accepted() {
    let app = app(false);
    let name = "M".repeat(500);
    let product = create(&app, &name, 300.0).await;
    assert_eq!(product["name"], name.as_str());
}

#[tokio::test]
async fn put_replaces_all_fields() {
    let app = app(false);
    let created = create(&app, "Monitor", 300.0).await;
    let uri = format!("/api/products/{}", created["id"]);

    let (status, body) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({ "name": "Monitor 4K", "price": 450, "availability": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], created["id"]);
    assert_eq!(body["data"]["name"], "Monitor 4K");
    assert_eq!(body["data"]["price"], 450.0);
    assert_eq!(body["data"]["availability"], false);
}

#[tokio::test]
async fn put_reports_every_failure_together() {
    let app = app(false);
    let (status, body) = send(
        &app,
        "PUT",
        "/api/products/x",
        Some(json!({ "name": "", "price": 10, "availability": "maybe" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        messages(&body),
        [
            "Invalid id",
            "Product name must not be empty",
            "Invalid availability value"
        ]
    );
}

#[tokio::test]
async fn put_requires_availability() {
    let app = app(false);
    let created = create(&app, "Monitor", 300.0).await;
    let uri = format!("/api/products/{}", created["id"]);

    let (status, body) = send(&app, "PUT", &uri, Some(json!({ "name": "Monitor", "price": 1 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(messages(&body), ["Invalid availability value"]);
}

#[tokio::test]
async fn put_on_missing_product_is_not_found() {
    let app = app(false);
    let (status, _) = send(
        &app,
        "PUT",
        "/api/products/41",
        Some(json!({ "name": "Ghost", "price": 1, "availability": true })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let app = app(false);
    let created = create(&app, "Monitor", 300.0).await;
    let uri = format!("/api/products/{}", created["id"]);

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], "Product deleted");

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_hides_timestamps_and_availability() {
    let app = app(false);
    create(&app, "Monitor", 300.0).await;
    create(&app, "Mouse", 20.0).await;

    let (status, body) = send(&app, "GET", "/api/products", None).await;
    assert_eq!(status, StatusCode::OK);
    let items = body["data"].as_array().expect("array of products");
    assert_eq!(items.len(), 2);
    for item in items {
        let keys: Vec<_> = item.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 3, "{keys:?}");
        assert!(item.get("created_at").is_none());
        assert!(item.get("updated_at").is_none());
        assert!(item.get("availability").is_none());
    }
}

#[tokio::test]
async fn unknown_route_uses_fallback() {
    let app = app(false);
    let (status, body) = send(&app, "GET", "/api/nothing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Not Found");
}

#[tokio::test]
async fn docs_are_served_only_when_enabled() {
    let request = || Request::builder().uri("/docs").body(Body::empty()).unwrap();

    let response = app(true).oneshot(request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app(false).oneshot(request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = app(false);
    let request = Request::builder()
        .uri("/api/products")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}
