use std::sync::Arc;

use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use shared_api::ApiClient;
use shared_models::booking::Booking;
use shared_models::error::ClientError;

use crate::cache::BookingCache;

#[derive(Debug, Deserialize)]
struct PaymentIntent {
    #[serde(rename = "clientSecret")]
    client_secret: String,
}

/// Bridge to the hosted payment form. The card handling itself is opaque to
/// this client: we mint the intent, hand the secret to the widget, and once
/// the widget reports success we mark the booking paid.
pub struct PaymentFlow {
    api: Arc<ApiClient>,
}

impl PaymentFlow {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn create_intent(&self, appointment_id: &str) -> Result<String, ClientError> {
        debug!("Creating payment intent for {}", appointment_id);

        let intent: PaymentIntent = self
            .api
            .request(
                Method::POST,
                "/payment/create-payment-intent",
                Some(json!({ "appointmentId": appointment_id })),
            )
            .await?;

        Ok(intent.client_secret)
    }

    /// Called after the external confirmation succeeds.
    pub async fn confirm_paid(
        &self,
        cache: &BookingCache,
        appointment_id: &str,
    ) -> Result<Booking, ClientError> {
        cache.pay(appointment_id).await
    }
}
