use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::*;
use crate::config::ServerConfig;
use crate::services::catalog::ProductCatalog;
use crate::state::test_helpers::test_app_state;

#[tokio::test]
async fn get_product_returns_record() {
    let state = test_app_state();
    let Json(product) = get_product(State(state), Path("P002".into())).await.unwrap();
    assert_eq!(product.id, "P002");
    assert_eq!(product.name, "데님 팬츠");
}

#[tokio::test]
async fn get_product_unknown_is_404() {
    let state = test_app_state();
    let err = get_product(State(state), Path("P404".into())).await.unwrap_err();
    assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn random_product_id_is_in_catalog() {
    let state = test_app_state();
    for _ in 0..20 {
        let Json(resp) = random_product_id(State(state.clone())).await.unwrap();
        assert!(state.catalog.contains(&resp.product_id));
    }
}

#[tokio::test]
async fn random_product_id_empty_catalog_is_404() {
    let state = AppState::new(ProductCatalog::default(), ServerConfig::default());
    let err = random_product_id(State(state)).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}

#[test]
fn random_product_response_uses_camel_case() {
    let json = serde_json::to_value(RandomProductResponse { product_id: "P001".into() }).unwrap();
    assert_eq!(json, serde_json::json!({ "productId": "P001" }));
}
