use std::sync::Arc;

use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use booking_cell::{BookingCache, BookingUpdate, PaymentFlow};
use shared_api::ApiClient;
use shared_models::booking::BookingStatus;
use shared_models::error::ClientError;
use shared_models::request::RequestState;
use shared_utils::test_utils::{MockApiResponses, TestConfig};

fn build(server_uri: &str) -> (Arc<ApiClient>, BookingCache) {
    let config = TestConfig::for_server(server_uri).to_app_config();
    let api = Arc::new(ApiClient::new(&config).unwrap());
    let cache = BookingCache::new(Arc::clone(&api));
    (api, cache)
}

#[tokio::test]
async fn fetch_mine_populates_the_cache() {
    let server = MockServer::start().await;
    let (_, cache) = build(&server.uri());

    Mock::given(method("GET"))
        .and(path("/appointments/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockApiResponses::booking_json("b-1", "d-1", "u-1", "2025-06-10", "09:00"),
            MockApiResponses::booking_json("b-2", "d-2", "u-1", "2025-06-11", "10:30"),
        ])))
        .mount(&server)
        .await;

    let bookings = cache.fetch_mine().await.unwrap();
    assert_eq!(bookings.len(), 2);
    assert_eq!(cache.state(), RequestState::Succeeded);
    assert_eq!(cache.bookings()[1].id, "b-2");
}

#[tokio::test]
async fn fetch_failure_is_recorded_for_retry() {
    let server = MockServer::start().await;
    let (_, cache) = build(&server.uri());

    Mock::given(method("GET"))
        .and(path("/appointments/me"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "Unavailable" })),
        )
        .mount(&server)
        .await;

    let result = cache.fetch_mine().await;
    assert_matches!(result, Err(ClientError::Api(msg)) if msg == "Unavailable");
    assert_eq!(cache.state(), RequestState::Failed("Unavailable".to_string()));
}

#[tokio::test]
async fn update_sends_only_set_fields_and_replaces_the_entry() {
    let server = MockServer::start().await;
    let (_, cache) = build(&server.uri());

    Mock::given(method("GET"))
        .and(path("/appointments/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockApiResponses::booking_json("b-1", "d-1", "u-1", "2025-06-10", "09:00"),
        ])))
        .mount(&server)
        .await;

    let mut completed = MockApiResponses::booking_json("b-1", "d-1", "u-1", "2025-06-10", "09:00");
    completed["status"] = json!("Completed");
    Mock::given(method("PUT"))
        .and(path("/appointments/b-1"))
        .and(body_json(json!({ "status": "Completed" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completed))
        .mount(&server)
        .await;

    cache.fetch_mine().await.unwrap();
    let update = BookingUpdate {
        status: Some(BookingStatus::Completed),
        ..BookingUpdate::default()
    };
    cache.update("b-1", update).await.unwrap();

    assert_eq!(cache.bookings()[0].status, BookingStatus::Completed);
}

#[tokio::test]
async fn pay_hits_the_payment_route_and_marks_paid() {
    let server = MockServer::start().await;
    let (_, cache) = build(&server.uri());

    Mock::given(method("GET"))
        .and(path("/appointments/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockApiResponses::booking_json("b-1", "d-1", "u-1", "2025-06-10", "09:00"),
        ])))
        .mount(&server)
        .await;

    let mut paid = MockApiResponses::booking_json("b-1", "d-1", "u-1", "2025-06-10", "09:00");
    paid["paid"] = json!(true);
    Mock::given(method("PUT"))
        .and(path("/appointments/b-1/pay"))
        .and(body_json(json!({ "paid": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(paid))
        .expect(1)
        .mount(&server)
        .await;

    cache.fetch_mine().await.unwrap();
    let booking = cache.pay("b-1").await.unwrap();

    assert!(booking.paid);
    assert!(cache.bookings()[0].paid);
}

#[tokio::test]
async fn remove_drops_the_entry() {
    let server = MockServer::start().await;
    let (_, cache) = build(&server.uri());

    Mock::given(method("GET"))
        .and(path("/appointments/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockApiResponses::booking_json("b-1", "d-1", "u-1", "2025-06-10", "09:00"),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/appointments/b-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("b-1")))
        .mount(&server)
        .await;

    cache.fetch_mine().await.unwrap();
    cache.remove("b-1").await.unwrap();
    assert!(cache.bookings().is_empty());
}

#[tokio::test]
async fn payment_flow_mints_intent_then_confirms() {
    let server = MockServer::start().await;
    let (api, cache) = build(&server.uri());

    Mock::given(method("GET"))
        .and(path("/appointments/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockApiResponses::booking_json("b-1", "d-1", "u-1", "2025-06-10", "09:00"),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/payment/create-payment-intent"))
        .and(body_json(json!({ "appointmentId": "b-1" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "clientSecret": "pi_secret_123" })),
        )
        .mount(&server)
        .await;

    let mut paid = MockApiResponses::booking_json("b-1", "d-1", "u-1", "2025-06-10", "09:00");
    paid["paid"] = json!(true);
    Mock::given(method("PUT"))
        .and(path("/appointments/b-1/pay"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paid))
        .mount(&server)
        .await;

    cache.fetch_mine().await.unwrap();

    let flow = PaymentFlow::new(api);
    let secret = flow.create_intent("b-1").await.unwrap();
    assert_eq!(secret, "pi_secret_123");

    // The hosted widget's card step happens outside this client; after it
    // reports success the booking is marked paid.
    let booking = flow.confirm_paid(&cache, "b-1").await.unwrap();
    assert!(booking.paid);
}
