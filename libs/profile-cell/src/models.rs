use serde::{Deserialize, Serialize};

use shared_models::identity::ImageRef;
use shared_models::request::ImageUpload;

/// Patient-specific attributes layered on top of the identity. Owned by the
/// profile cache, keyed off the identity id, refreshed whenever the session
/// signs a patient-like principal in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
}

/// Multipart payload for `PUT /users/profile/me`. Only set fields travel.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileForm {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub image: Option<ImageUpload>,
}
