use serde::{Deserialize, Serialize};
use std::fmt;

/// Role label issued by the server. `User` and `Patient` are treated as
/// interchangeable everywhere access or profile behavior depends on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Doctor,
    Patient,
    User,
    #[serde(other)]
    Unknown,
}

impl Role {
    pub fn is_patient_like(&self) -> bool {
        matches!(self, Role::Patient | Role::User)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Doctor => write!(f, "doctor"),
            Role::Patient => write!(f, "patient"),
            Role::User => write!(f, "user"),
            Role::Unknown => write!(f, "unknown"),
        }
    }
}

/// Image reference as the API emits it: either an object carrying a hosted
/// URL or a bare path string. Normalization to a displayable URL happens
/// once, at the ingestion boundary (`shared_utils::image`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageRef {
    Hosted { url: String },
    Path(String),
}

/// The authenticated principal as returned by login, registration, or the
/// identity refresh endpoint. The persisted copy and the in-memory copy are
/// kept consistent by the session store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
}
