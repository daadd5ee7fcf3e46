use axum::body::Body;
use axum::extract::FromRequest;
use axum::http::{Request, StatusCode, header};

use super::*;
use crate::state::test_helpers::{test_app_state, test_app_state_enforcing};

fn body(product_id: &str, size: &str, color: &str) -> Result<Json<AddItemBody>, JsonRejection> {
    Ok(Json(AddItemBody { product_id: product_id.into(), size: size.into(), color: color.into() }))
}

async fn raw_body(raw: &'static str) -> Result<Json<AddItemBody>, JsonRejection> {
    let req = Request::builder()
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(raw))
        .unwrap();
    Json::<AddItemBody>::from_request(req, &()).await
}

async fn add(state: &AppState, session: &str, product_id: &str) -> CartItem {
    let Json(item) = add_item(State(state.clone()), Path(session.into()), body(product_id, "M", "black"))
        .await
        .unwrap();
    item
}

// =============================================================================
// add
// =============================================================================

#[tokio::test]
async fn add_then_list_round_trip() {
    let state = test_app_state();
    let Json(item) = add_item(State(state.clone()), Path("sess1".into()), body("P001", "M", "black"))
        .await
        .unwrap();
    assert_eq!(item.product_id, "P001");
    assert_eq!(item.name, "블랙 자켓");
    assert_eq!(item.size, "M");
    assert_eq!(item.color, "black");

    let Json(items) = list_cart(State(state), Path("sess1".into())).await;
    assert_eq!(items, vec![item]);
}

#[tokio::test]
async fn add_unknown_product_is_400_and_creates_nothing() {
    let state = test_app_state();
    let err = add_item(State(state.clone()), Path("s".into()), body("P999", "M", "black"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert!(state.sessions.is_empty());
}

#[tokio::test]
async fn add_blank_product_id_is_invalid_product() {
    let state = test_app_state();
    let err = add_item(State(state), Path("s".into()), body("  ", "M", "black"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Cart(CartError::InvalidProduct(_))));
}

#[tokio::test]
async fn add_padded_product_id_is_400_and_cart_stays_empty() {
    let state = test_app_state();
    let err = add_item(State(state.clone()), Path("s".into()), body(" P001 ", "M", "black"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Cart(CartError::InvalidProduct(ref id)) if id == " P001 "));
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert!(!state.sessions.contains("s"));
    let Json(items) = list_cart(State(state), Path("s".into())).await;
    assert!(items.is_empty());
}

#[tokio::test]
async fn add_missing_fields_default_to_empty() {
    let state = test_app_state();
    let Json(item) = add_item(State(state), Path("s".into()), raw_body(r#"{"productId":"P003"}"#).await)
        .await
        .unwrap();
    assert_eq!(item.product_id, "P003");
    assert_eq!(item.size, "");
    assert_eq!(item.color, "");
}

#[tokio::test]
async fn add_malformed_json_is_400() {
    let state = test_app_state();
    let err = add_item(State(state), Path("s".into()), raw_body("{not json").await)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn add_accepts_unlisted_options_by_default() {
    let state = test_app_state();
    let Json(item) = add_item(State(state), Path("s".into()), body("P001", "XXXL", "neon"))
        .await
        .unwrap();
    assert_eq!(item.size, "XXXL");
}

#[tokio::test]
async fn add_rejects_unlisted_options_when_enforcing() {
    let state = test_app_state_enforcing();
    let err = add_item(State(state), Path("s".into()), body("P001", "XXXL", "black"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// list
// =============================================================================

#[tokio::test]
async fn list_unknown_session_creates_empty_cart() {
    let state = test_app_state();
    let Json(items) = list_cart(State(state.clone()), Path("fresh".into())).await;
    assert!(items.is_empty());
    assert!(state.sessions.contains("fresh"));
}

#[tokio::test]
async fn list_keeps_insertion_order_and_duplicates() {
    let state = test_app_state();
    let a = add(&state, "s", "P002").await;
    let b = add(&state, "s", "P001").await;
    let c = add(&state, "s", "P002").await;
    let Json(items) = list_cart(State(state), Path("s".into())).await;
    let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![a.id, b.id, c.id]);
}

// =============================================================================
// remove
// =============================================================================

#[tokio::test]
async fn remove_existing_item() {
    let state = test_app_state();
    let item = add(&state, "s", "P001").await;
    let Json(resp) = remove_item(State(state.clone()), Path(("s".into(), item.id.to_string())))
        .await
        .unwrap();
    assert!(resp.success);
    assert!(state.sessions.list_items("s").is_empty());
}

#[tokio::test]
async fn remove_unknown_item_is_404() {
    let state = test_app_state();
    add(&state, "s", "P001").await;
    let err = remove_item(State(state), Path(("s".into(), "1".into())))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Cart(CartError::ItemNotFound(_))));
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn remove_from_missing_session_is_404_and_does_not_create() {
    let state = test_app_state();
    let err = remove_item(State(state.clone()), Path(("ghost".into(), "1".into())))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Cart(CartError::SessionNotFound(_))));
    assert!(!state.sessions.contains("ghost"));
}

#[tokio::test]
async fn remove_non_numeric_item_id() {
    let state = test_app_state();
    add(&state, "s", "P001").await;

    let err = remove_item(State(state.clone()), Path(("s".into(), "abc".into())))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Cart(CartError::ItemNotFound(_))));

    let err = remove_item(State(state), Path(("ghost".into(), "abc".into())))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Cart(CartError::SessionNotFound(_))));
}

// =============================================================================
// mirror view
// =============================================================================

#[tokio::test]
async fn session_view_lists_clicked_products() {
    let state = test_app_state();
    let item = add(&state, "mirror", "P003").await;
    let Json(view) = session_view(State(state), Path("mirror".into())).await.unwrap();
    assert_eq!(view.session_id, "mirror");
    assert_eq!(view.clicked_products, vec![item]);

    let json = serde_json::to_value(&view).unwrap();
    assert!(json.get("clickedProducts").is_some());
    assert_eq!(json["sessionId"], "mirror");
}

#[tokio::test]
async fn session_view_unknown_is_404_and_does_not_create() {
    let state = test_app_state();
    let err = session_view(State(state.clone()), Path("nobody".into())).await.unwrap_err();
    assert!(matches!(err, ApiError::Cart(CartError::SessionNotFound(_))));
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
    assert!(state.sessions.is_empty());
}
