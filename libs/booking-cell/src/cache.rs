use std::sync::{Arc, RwLock};

use reqwest::Method;
use serde_json::json;
use tracing::debug;

use shared_api::ApiClient;
use shared_models::booking::Booking;
use shared_models::error::ClientError;
use shared_models::request::RequestState;

use crate::models::BookingUpdate;

#[derive(Debug, Default)]
struct Inner {
    bookings: Vec<Booking>,
    state: RequestState,
}

/// The bookings currently in view. Which slice that is depends on who is
/// looking: a patient loads their own, a doctor loads their schedule, an
/// admin loads everything. Mutations keep the local list in step with the
/// server's answer.
pub struct BookingCache {
    api: Arc<ApiClient>,
    inner: RwLock<Inner>,
}

impl BookingCache {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            inner: RwLock::new(Inner::default()),
        }
    }

    pub fn bookings(&self) -> Vec<Booking> {
        self.inner.read().unwrap().bookings.clone()
    }

    pub fn state(&self) -> RequestState {
        self.inner.read().unwrap().state.clone()
    }

    pub async fn fetch_mine(&self) -> Result<Vec<Booking>, ClientError> {
        debug!("Fetching my bookings");
        self.fetch("/appointments/me").await
    }

    pub async fn fetch_for_doctor(&self, doctor_id: &str) -> Result<Vec<Booking>, ClientError> {
        debug!("Fetching bookings for doctor {}", doctor_id);
        self.fetch(&format!("/appointments/doctor/{}", doctor_id)).await
    }

    pub async fn fetch_all(&self) -> Result<Vec<Booking>, ClientError> {
        debug!("Fetching all bookings");
        self.fetch("/appointments").await
    }

    async fn fetch(&self, path: &str) -> Result<Vec<Booking>, ClientError> {
        self.inner.write().unwrap().state = RequestState::Pending;

        let result: Result<Vec<Booking>, ClientError> =
            self.api.request(Method::GET, path, None).await;

        let mut inner = self.inner.write().unwrap();
        match result {
            Ok(bookings) => {
                inner.bookings = bookings.clone();
                inner.state = RequestState::Succeeded;
                Ok(bookings)
            }
            Err(e) => {
                inner.state = RequestState::Failed(e.message().to_string());
                Err(e)
            }
        }
    }

    /// Status or schedule change by a doctor or admin.
    pub async fn update(&self, booking_id: &str, update: BookingUpdate) -> Result<Booking, ClientError> {
        debug!("Updating booking {}", booking_id);

        let body = serde_json::to_value(&update)
            .map_err(|e| ClientError::Api(format!("Cannot serialize update: {}", e)))?;
        let path = format!("/appointments/{}", booking_id);
        let booking: Booking = self.api.request(Method::PUT, &path, Some(body)).await?;

        self.replace(booking.clone());
        Ok(booking)
    }

    /// Patient payment route; hit after the hosted payment form confirms.
    pub async fn pay(&self, booking_id: &str) -> Result<Booking, ClientError> {
        debug!("Marking booking {} paid", booking_id);

        let path = format!("/appointments/{}/pay", booking_id);
        let booking: Booking = self
            .api
            .request(Method::PUT, &path, Some(json!({ "paid": true })))
            .await?;

        self.replace(booking.clone());
        Ok(booking)
    }

    pub async fn remove(&self, booking_id: &str) -> Result<(), ClientError> {
        debug!("Deleting booking {}", booking_id);

        let path = format!("/appointments/{}", booking_id);
        let _: serde_json::Value = self.api.request(Method::DELETE, &path, None).await?;

        self.inner
            .write()
            .unwrap()
            .bookings
            .retain(|b| b.id != booking_id);
        Ok(())
    }

    /// Append a booking the workflow just created.
    pub fn push(&self, booking: Booking) {
        self.inner.write().unwrap().bookings.push(booking);
    }

    fn replace(&self, booking: Booking) {
        let mut inner = self.inner.write().unwrap();
        if let Some(existing) = inner.bookings.iter_mut().find(|b| b.id == booking.id) {
            *existing = booking;
        }
    }
}
