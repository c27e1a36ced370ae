use serde::{Deserialize, Serialize};
use std::fmt;

use crate::identity::ImageRef;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum BookingStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStatus::Pending => write!(f, "Pending"),
            BookingStatus::Completed => write!(f, "Completed"),
            BookingStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Display subset of a doctor or patient embedded in a booking response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartySummary {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speciality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
}

/// The server populates booking references inconsistently: a fresh create
/// returns bare ids, list endpoints return embedded documents. Both shapes
/// resolve to an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PartyRef {
    Embedded(PartySummary),
    Id(String),
}

impl PartyRef {
    pub fn id(&self) -> &str {
        match self {
            PartyRef::Embedded(summary) => &summary.id,
            PartyRef::Id(id) => id,
        }
    }
}

/// An appointment booking. The (doctor, date, time) triple is unique among
/// non-cancelled bookings; the workflow checks this against its local cache
/// before submitting and the server enforces it authoritatively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(alias = "_id")]
    pub id: String,
    pub doctor: PartyRef,
    #[serde(alias = "user")]
    pub patient: PartyRef,
    /// Calendar day, ISO `YYYY-MM-DD`.
    pub date: String,
    /// Slot label, `HH:MM`.
    pub time: String,
    #[serde(default)]
    pub fees: f64,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default)]
    pub paid: bool,
    #[serde(default)]
    pub reason: String,
}

impl Booking {
    pub fn is_cancelled(&self) -> bool {
        self.status == BookingStatus::Cancelled
    }
}

/// Wire shape of `GET /appointments/doctor-slots/:id` — one occupied
/// (date, time) pair per non-deleted booking of that doctor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookedSlot {
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub cancelled: bool,
}
