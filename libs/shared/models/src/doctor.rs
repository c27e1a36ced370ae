use serde::{Deserialize, Serialize};

use crate::identity::ImageRef;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
}

/// A doctor as listed by the server. The roster is an ordered sequence; it
/// backs both the public listing and the display data of bookings that only
/// reference a doctor by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub speciality: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub experience: u32,
    #[serde(default)]
    pub fees: f64,
    #[serde(default)]
    pub address: Address,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
    #[serde(default)]
    pub about: String,
}

// A doctor with no explicit availability flag is accepting appointments.
fn default_available() -> bool {
    true
}
