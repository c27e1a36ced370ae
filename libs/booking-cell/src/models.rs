use serde::Serialize;

use shared_models::booking::BookingStatus;
use shared_models::doctor::Doctor;

/// Partial update for `PUT /appointments/:id` (status changes, admin
/// rescheduling). Only set fields travel.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BookingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

/// Snapshot of the workflow's transient selection, for rendering.
#[derive(Debug, Clone, Default)]
pub struct SelectionView {
    pub doctor: Option<Doctor>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub reason: String,
}
