// bowl-client/tests/cart_sync.rs
// Customer cart synchronization against a mock server

mod common;

use std::sync::Arc;

use bowl_client::controllers::CustomerDashboard;
use bowl_client::notify::Level;
use bowl_client::{ClientError, ErrorCode};
use common::*;
use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, ResponseTemplate};

const CART_PATH: &str = "/api/cart/customer/7";

async fn mount_cart_sequence(server: &wiremock::MockServer, before: serde_json::Value, after: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(CART_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(before))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(CART_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(after))
        .with_priority(2)
        .mount(server)
        .await;
}

fn dashboard(env: &TestEnv) -> CustomerDashboard<bowl_client::NetworkHttpClient> {
    CustomerDashboard::new(env.http.clone(), Arc::new(env.notifier.clone()), &customer_session())
        .expect("customer session")
}

#[tokio::test]
async fn increment_sends_next_quantity_and_recomputes_total() {
    let env = setup().await;
    mount_cart_sequence(
        &env.server,
        cart_json(&[(1, "A", 50, 3)]),
        cart_json(&[(1, "A", 50, 4)]),
    )
    .await;
    Mock::given(method("PUT"))
        .and(path("/api/cart/update/1"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("customerId=7"))
        .and(body_string_contains("quantity=4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "quantity": 4})))
        .expect(1)
        .mount(&env.server)
        .await;

    let mut dash = dashboard(&env);
    let view = dash.increment(1).await.unwrap();

    assert_eq!(view.line(1).unwrap().quantity, 4);
    assert_eq!(view.total, Decimal::from(200));
    assert_eq!(view.item_count, 4);
    assert_eq!(dash.cart(), &view);
}

#[tokio::test]
async fn total_comes_from_latest_response() {
    let env = setup().await;
    mount_cart_sequence(
        &env.server,
        cart_json(&[(1, "A", 50, 3)]),
        // another tab added an item meanwhile
        cart_json(&[(1, "A", 50, 4), (2, "B", 30, 1)]),
    )
    .await;
    Mock::given(method("PUT"))
        .and(path("/api/cart/update/1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&env.server)
        .await;

    let mut dash = dashboard(&env);
    let view = dash.increment(1).await.unwrap();

    assert_eq!(view.total, Decimal::from(230));
    assert_eq!(view.item_count, 5);
}

#[tokio::test]
async fn increment_at_maximum_sends_nothing() {
    let env = setup().await;
    Mock::given(method("GET"))
        .and(path(CART_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(cart_json(&[(1, "A", 50, 99)])))
        .mount(&env.server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&env.server)
        .await;

    let mut dash = dashboard(&env);
    let view = dash.increment(1).await.unwrap();

    assert_eq!(view.line(1).unwrap().quantity, 99);
    assert!(!view.line(1).unwrap().can_increment);
    let last = env.notifier.last().unwrap();
    assert_eq!(last.level, Level::Warning);
    assert!(last.message.contains("99"));
}

#[tokio::test]
async fn decrement_at_minimum_sends_nothing() {
    let env = setup().await;
    Mock::given(method("GET"))
        .and(path(CART_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(cart_json(&[(4, "Tea", 35, 1)])))
        .mount(&env.server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&env.server)
        .await;

    let mut dash = dashboard(&env);
    let view = dash.decrement(4).await.unwrap();

    assert_eq!(view.line(4).unwrap().quantity, 1);
    assert!(!view.line(4).unwrap().can_decrement);
    assert_eq!(env.notifier.last().unwrap().level, Level::Warning);
}

#[tokio::test]
async fn structured_limit_code_is_a_warning() {
    let env = setup().await;
    Mock::given(method("GET"))
        .and(path(CART_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(cart_json(&[(1, "A", 50, 5)])))
        .mount(&env.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/cart/update/1"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "QUANTITY_EXCEEDS_MAXIMUM",
            "message": "Cart limit reached",
            "timestamp": "2024-03-01T12:00:00"
        })))
        .expect(1)
        .mount(&env.server)
        .await;

    let mut dash = dashboard(&env);
    let view = dash.increment(1).await.unwrap();

    assert_eq!(view.line(1).unwrap().quantity, 5);
    assert_eq!(env.notifier.last().unwrap().level, Level::Warning);
}

#[tokio::test]
async fn legacy_limit_text_falls_back_to_substring() {
    let env = setup().await;
    Mock::given(method("GET"))
        .and(path(CART_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(cart_json(&[(1, "A", 50, 2)])))
        .mount(&env.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/cart/update/1"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Quantity cannot be less than 1"))
        .mount(&env.server)
        .await;

    let mut dash = dashboard(&env);
    dash.decrement(1).await.unwrap();

    let last = env.notifier.last().unwrap();
    assert_eq!(last.level, Level::Warning);
    assert!(last.message.contains("at least 1"));
}

#[tokio::test]
async fn other_write_failures_are_errors_and_cart_is_refetched() {
    let env = setup().await;
    Mock::given(method("GET"))
        .and(path(CART_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(cart_json(&[(1, "A", 50, 2)])))
        .expect(2)
        .mount(&env.server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "code": "UNAUTHORIZED_CART_ACCESS",
            "message": "Cart belongs to another customer"
        })))
        .mount(&env.server)
        .await;

    let mut dash = dashboard(&env);
    let err = dash.increment(1).await.unwrap_err();

    assert!(matches!(err, ClientError::Forbidden(_)));
    assert_eq!(env.notifier.last().unwrap().level, Level::Error);
}

#[tokio::test]
async fn unknown_line_is_reported_without_write() {
    let env = setup().await;
    Mock::given(method("GET"))
        .and(path(CART_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(cart_json(&[(1, "A", 50, 2)])))
        .mount(&env.server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&env.server)
        .await;

    let mut dash = dashboard(&env);
    let err = dash.increment(42).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
}

#[tokio::test]
async fn add_to_cart_posts_form_and_reloads() {
    let env = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/manager/menu-items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(menu_json()))
        .mount(&env.server)
        .await;
    mount_cart_sequence(&env.server, cart_json(&[]), cart_json(&[(9, "Thai Tea", 35, 1)])).await;
    Mock::given(method("POST"))
        .and(path("/api/cart/add"))
        .and(body_string_contains("customerId=7"))
        .and(body_string_contains("menuItemId=2"))
        .and(body_string_contains("quantity=1"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 9})))
        .expect(1)
        .mount(&env.server)
        .await;

    let mut dash = dashboard(&env);
    dash.load_cart().await;
    let menu = dash.load_menu().await;
    assert_eq!(menu.len(), 2, "inactive items are hidden");

    let view = dash.add_to_cart(2).await.unwrap();
    assert_eq!(view.item_count, 1);
    assert_eq!(env.notifier.last().unwrap().message, "Thai Tea added to cart");
}

#[tokio::test]
async fn remove_sends_customer_and_reloads() {
    let env = setup().await;
    mount_cart_sequence(&env.server, cart_json(&[(1, "A", 50, 2)]), cart_json(&[])).await;
    Mock::given(method("DELETE"))
        .and(path("/api/cart/remove/1"))
        .and(body_string_contains("customerId=7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&env.server)
        .await;

    let mut dash = dashboard(&env);
    assert_eq!(dash.load_cart().await.item_count, 2);
    let view = dash.remove(1).await.unwrap();
    assert!(view.is_empty());
    assert_eq!(view.total, Decimal::ZERO);
}

#[tokio::test]
async fn failed_cart_fetch_renders_empty() {
    let env = setup().await;
    Mock::given(method("GET"))
        .and(path(CART_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&env.server)
        .await;

    let mut dash = dashboard(&env);
    assert!(dash.load_cart().await.is_empty());
}

#[tokio::test]
async fn empty_cart_order_is_rejected_locally() {
    let env = setup().await;
    Mock::given(method("GET"))
        .and(path(CART_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(cart_json(&[])))
        .mount(&env.server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&env.server)
        .await;

    let mut dash = dashboard(&env);
    let err = dash.place_order().await.unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::EmptyCart));
    assert_eq!(env.notifier.last().unwrap().level, Level::Error);
}

#[tokio::test]
async fn place_order_reloads_cart() {
    let env = setup().await;
    mount_cart_sequence(&env.server, cart_json(&[(1, "A", 50, 2)]), cart_json(&[])).await;
    Mock::given(method("POST"))
        .and(path("/api/orders/customers/7/place-order"))
        .respond_with(ResponseTemplate::new(201).set_body_json(order_json(
            30,
            CUSTOMER_ID,
            "Pending",
            "2024-03-01T12:00:00",
        )))
        .expect(1)
        .mount(&env.server)
        .await;

    let mut dash = dashboard(&env);
    dash.place_order().await.unwrap();
    assert!(dash.cart().is_empty());
    assert_eq!(env.notifier.last().unwrap().level, Level::Success);
}

#[tokio::test]
async fn place_order_failure_carries_server_message() {
    let env = setup().await;
    Mock::given(method("GET"))
        .and(path(CART_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(cart_json(&[(1, "A", 50, 2)])))
        .mount(&env.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/orders/customers/7/place-order"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"message": "Kitchen is closed"})))
        .mount(&env.server)
        .await;

    let mut dash = dashboard(&env);
    assert!(dash.place_order().await.is_err());
    assert!(env.notifier.last().unwrap().message.contains("Kitchen is closed"));
}

#[tokio::test]
async fn welcome_text_prefers_profile_name() {
    let env = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/customers/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7, "username": "nok", "name": "Nok Sriwan", "email": "nok@example.com"
        })))
        .mount(&env.server)
        .await;

    let dash = dashboard(&env);
    assert_eq!(dash.welcome_text().await, "Hello, Nok Sriwan");
}

#[tokio::test]
async fn dashboard_requires_customer_session() {
    let env = setup().await;
    let result = CustomerDashboard::new(
        env.http.clone(),
        Arc::new(env.notifier.clone()),
        &employee_session(),
    );
    assert!(matches!(result, Err(ClientError::Session(_))));
}
