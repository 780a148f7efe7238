use axum::extract::State;
use axum_products_api::{
    repository::InMemoryProductRepository, routes::health::health_check, state::AppState,
};

#[tokio::test]
async fn health_check_returns_ok() {
    let state = AppState::new(InMemoryProductRepository::new());
    let response = health_check(State(state)).await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
    assert_eq!(data.database, "ok");
}
