use serde::Deserialize;

use shared_models::error::ClientError;
use shared_models::identity::{Identity, Role};
use shared_models::request::ImageUpload;
use shared_utils::validate::{validate_email, validate_password, validate_phone};

/// Authentication lifecycle of the client. `RefreshFailed` deliberately
/// retains the last known identity: a failed re-verification must never log
/// the user out.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Unauthenticated,
    Authenticating,
    Authenticated(Identity),
    RefreshFailed(Identity),
}

impl SessionState {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            SessionState::Authenticated(identity) | SessionState::RefreshFailed(identity) => {
                Some(identity)
            }
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity().is_some()
    }
}

/// Broadcast to dependent caches. `SignedIn` fires exactly once per
/// transition into `Authenticated` (login, registration, or startup
/// rehydration); a background refresh that merely updates the identity in
/// place fires `Refreshed` instead.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    SignedIn(Identity),
    Refreshed(Identity),
    SignedOut,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), ClientError> {
        if !validate_email(&self.email) {
            return Err(ClientError::Validation("A valid email is required".to_string()));
        }
        if self.password.is_empty() {
            return Err(ClientError::Validation("Password is required".to_string()));
        }
        Ok(())
    }
}

/// Registration payload; travels as a multipart form because it may carry a
/// profile image.
#[derive(Debug, Clone)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub age: u32,
    pub gender: String,
    pub address: String,
    pub image: Option<ImageUpload>,
    pub role: Role,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.name.trim().is_empty() {
            return Err(ClientError::Validation("Name is required".to_string()));
        }
        if !validate_email(&self.email) {
            return Err(ClientError::Validation("A valid email is required".to_string()));
        }
        if !validate_phone(&self.phone) {
            return Err(ClientError::Validation("A valid phone number is required".to_string()));
        }
        if !validate_password(&self.password) {
            return Err(ClientError::Validation(
                "Password must be at least 6 characters".to_string(),
            ));
        }
        Ok(())
    }
}

/// Envelope the auth endpoints wrap the identity in. The refresh endpoint
/// may legitimately answer without a payload; overwriting only happens when
/// one is present.
#[derive(Debug, Deserialize)]
pub struct UserEnvelope {
    #[serde(default)]
    pub user: Option<Identity>,
}
