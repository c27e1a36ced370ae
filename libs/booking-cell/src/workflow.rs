use std::sync::{Arc, RwLock};

use chrono::{Local, NaiveDate};
use reqwest::Method;
use serde_json::json;
use tracing::debug;

use availability_cell::slots::default_time_slots;
use availability_cell::AvailabilityIndex;
use shared_api::ApiClient;
use shared_models::booking::{Booking, BookedSlot};
use shared_models::doctor::Doctor;
use shared_models::error::ClientError;
use shared_models::identity::Identity;
use shared_models::request::RequestState;

use crate::cache::BookingCache;
use crate::models::SelectionView;

#[derive(Debug, Default)]
struct Selection {
    doctor: Option<Doctor>,
    date: Option<String>,
    time: Option<String>,
    reason: String,
    slots: Vec<BookedSlot>,
    index: AvailabilityIndex,
    slot_state: RequestState,
}

/// Drives the pick-doctor, pick-date, pick-time, state-reason flow into a
/// booking submission. The availability index constrains what can be
/// selected; the session gates whether submission is allowed at all.
pub struct BookingWorkflow {
    api: Arc<ApiClient>,
    universe: Vec<String>,
    inner: RwLock<Selection>,
}

impl BookingWorkflow {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self::with_universe(api, default_time_slots())
    }

    pub fn with_universe(api: Arc<ApiClient>, universe: Vec<String>) -> Self {
        Self {
            api,
            universe,
            inner: RwLock::new(Selection::default()),
        }
    }

    pub fn selection(&self) -> SelectionView {
        let inner = self.inner.read().unwrap();
        SelectionView {
            doctor: inner.doctor.clone(),
            date: inner.date.clone(),
            time: inner.time.clone(),
            reason: inner.reason.clone(),
        }
    }

    pub fn slot_state(&self) -> RequestState {
        self.inner.read().unwrap().slot_state.clone()
    }

    pub fn is_date_fully_booked(&self, date: &str) -> bool {
        self.inner.read().unwrap().index.is_date_fully_booked(date)
    }

    pub fn is_time_booked(&self, date: &str, time: &str) -> bool {
        self.inner.read().unwrap().index.is_time_booked(date, time)
    }

    /// Switch the flow to `doctor` and load that doctor's occupied slots.
    pub async fn select_doctor(&self, doctor: Doctor) -> Result<(), ClientError> {
        self.select_doctor_as_of(doctor, Local::now().date_naive()).await
    }

    /// Same, with an explicit "today" for the past-slot cutoff.
    pub async fn select_doctor_as_of(
        &self,
        doctor: Doctor,
        today: NaiveDate,
    ) -> Result<(), ClientError> {
        let doctor_id = doctor.id.clone();
        {
            // Previously fetched slots belong to another doctor; drop them
            // immediately along with any date/time picked against them.
            let mut inner = self.inner.write().unwrap();
            inner.doctor = Some(doctor);
            inner.date = None;
            inner.time = None;
            inner.slots.clear();
            inner.index = AvailabilityIndex::new(&[], &self.universe);
            inner.slot_state = RequestState::Pending;
        }

        debug!("Fetching booked slots for doctor {}", doctor_id);
        let path = format!("/appointments/doctor-slots/{}", doctor_id);
        let result: Result<Vec<BookedSlot>, ClientError> =
            self.api.request(Method::GET, &path, None).await;

        let mut inner = self.inner.write().unwrap();

        // The user may have moved on to a different doctor mid-flight; a
        // late answer for the old one must not overwrite the new state.
        if inner.doctor.as_ref().map(|d| d.id.as_str()) != Some(doctor_id.as_str()) {
            debug!("Discarding slot response for superseded doctor {}", doctor_id);
            return Ok(());
        }

        match result {
            Ok(slots) => {
                let today_iso = today.format("%Y-%m-%d").to_string();
                let active: Vec<BookedSlot> = slots
                    .into_iter()
                    .filter(|slot| !slot.cancelled && slot.date >= today_iso)
                    .collect();

                inner.index = AvailabilityIndex::new(&active, &self.universe);
                inner.slots = active;
                inner.slot_state = RequestState::Succeeded;
                Ok(())
            }
            Err(e) => {
                inner.slot_state = RequestState::Failed(e.message().to_string());
                Err(e)
            }
        }
    }

    pub fn select_date(&self, date: &str) -> Result<(), ClientError> {
        let mut inner = self.inner.write().unwrap();
        if inner.index.is_date_fully_booked(date) {
            return Err(ClientError::Validation(
                "That day is fully booked".to_string(),
            ));
        }
        inner.date = Some(date.to_string());
        inner.time = None;
        Ok(())
    }

    pub fn select_time(&self, time: &str) -> Result<(), ClientError> {
        let mut inner = self.inner.write().unwrap();
        let date = inner
            .date
            .clone()
            .ok_or_else(|| ClientError::Validation("Please select a date first".to_string()))?;
        if inner.index.is_time_booked(&date, time) {
            return Err(ClientError::Validation(
                "That time slot is already taken".to_string(),
            ));
        }
        inner.time = Some(time.to_string());
        Ok(())
    }

    pub fn set_reason(&self, reason: &str) {
        self.inner.write().unwrap().reason = reason.to_string();
    }

    /// Submit the current selection. On success the transient date, time and
    /// reason are cleared and the booking lands in `cache`; on failure the
    /// whole selection is left intact so the user can retry.
    pub async fn submit(
        &self,
        identity: Option<&Identity>,
        cache: &BookingCache,
    ) -> Result<Booking, ClientError> {
        let identity = identity.ok_or_else(|| {
            ClientError::Auth("Please login to book an appointment".to_string())
        })?;

        let (doctor, date, time, reason) = {
            let inner = self.inner.read().unwrap();
            (
                inner.doctor.clone(),
                inner.date.clone(),
                inner.time.clone(),
                inner.reason.clone(),
            )
        };

        let doctor =
            doctor.ok_or_else(|| ClientError::Validation("All fields are required".to_string()))?;
        let (date, time) = match (date, time) {
            (Some(date), Some(time)) if !reason.trim().is_empty() => (date, time),
            _ => return Err(ClientError::Validation("All fields are required".to_string())),
        };

        if !doctor.available {
            return Err(ClientError::Validation(
                "This doctor is currently not accepting new appointments".to_string(),
            ));
        }

        // UX pre-check only; the server still enforces slot uniqueness.
        let already_booked = cache.bookings().iter().any(|booking| {
            booking.doctor.id() == doctor.id
                && !booking.is_cancelled()
                && booking.date == date
                && booking.time == time
        });
        if already_booked {
            return Err(ClientError::Conflict(
                "You already have an appointment at this slot".to_string(),
            ));
        }

        debug!(
            "Submitting booking for {} with doctor {} on {} {}",
            identity.id, doctor.id, date, time
        );
        let result: Result<Booking, ClientError> = self
            .api
            .request(
                Method::POST,
                "/appointments",
                Some(json!({
                    "doctor": doctor.id,
                    "date": date,
                    "time": time,
                    "reason": reason.trim(),
                    "fees": doctor.fees,
                })),
            )
            .await;

        match result {
            Ok(booking) => {
                let mut inner = self.inner.write().unwrap();
                inner.date = None;
                inner.time = None;
                inner.reason.clear();
                inner.slots.push(BookedSlot {
                    date: booking.date.clone(),
                    time: booking.time.clone(),
                    cancelled: false,
                });
                let index = AvailabilityIndex::new(&inner.slots, &self.universe);
                inner.index = index;
                cache.push(booking.clone());
                Ok(booking)
            }
            Err(e) => Err(e),
        }
    }
}
