use std::path::PathBuf;

use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::identity::{Identity, Role};

/// Configuration pointed at a test double (usually a wiremock server).
pub struct TestConfig {
    pub api_base_url: String,
    pub asset_base_url: String,
    pub session_file: PathBuf,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:4000/api".to_string(),
            asset_base_url: "http://localhost:4000/api".to_string(),
            session_file: PathBuf::from("test-session.json"),
        }
    }
}

impl TestConfig {
    pub fn for_server(uri: &str) -> Self {
        Self {
            api_base_url: uri.to_string(),
            asset_base_url: uri.to_string(),
            ..Self::default()
        }
    }

    pub fn with_session_file(mut self, path: PathBuf) -> Self {
        self.session_file = path;
        self
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            api_base_url: self.api_base_url.clone(),
            asset_base_url: self.asset_base_url.clone(),
            session_file: self.session_file.clone(),
        }
    }
}

/// Identity fixture with a fresh id per instance, one constructor per role.
pub struct TestIdentity {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl TestIdentity {
    pub fn new(email: &str, role: Role) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: "Test Person".to_string(),
            email: email.to_string(),
            role,
        }
    }

    pub fn patient(email: &str) -> Self {
        Self::new(email, Role::Patient)
    }

    pub fn doctor(email: &str) -> Self {
        Self::new(email, Role::Doctor)
    }

    pub fn admin(email: &str) -> Self {
        Self::new(email, Role::Admin)
    }

    pub fn to_identity(&self) -> Identity {
        Identity {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            image: None,
        }
    }
}

/// Canned response bodies matching the platform API's wire shapes.
pub struct MockApiResponses;

impl MockApiResponses {
    /// Envelope returned by login, registration and the identity refresh.
    pub fn user_envelope(identity: &Identity) -> Value {
        json!({ "user": identity })
    }

    pub fn profile_json(user_id: &str) -> Value {
        json!({
            "_id": user_id,
            "name": "Test Person",
            "email": "test@example.com",
            "phone": "0861234567",
            "age": 34,
            "gender": "other",
            "address": "12 Harbor Lane",
            "image": "/uploads/test.png"
        })
    }

    pub fn doctor_json(id: &str, name: &str) -> Value {
        json!({
            "_id": id,
            "name": name,
            "speciality": "General Practice",
            "degree": "MBBS",
            "experience": 8,
            "fees": 80.0,
            "address": { "line1": "4 Clinic Row" },
            "available": true,
            "image": "/uploads/doctor.png",
            "about": "General practitioner"
        })
    }

    pub fn booking_json(id: &str, doctor_id: &str, patient_id: &str, date: &str, time: &str) -> Value {
        json!({
            "_id": id,
            "doctor": { "_id": doctor_id, "name": "Dr. Amara Osei" },
            "user": patient_id,
            "date": date,
            "time": time,
            "fees": 80.0,
            "status": "Pending",
            "paid": false,
            "reason": "Check-up"
        })
    }

    pub fn booked_slot_json(date: &str, time: &str, cancelled: bool) -> Value {
        json!({ "date": date, "time": time, "cancelled": cancelled })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_fixture_round_trips() {
        let fixture = TestIdentity::patient("pat@example.com");
        let identity = fixture.to_identity();
        assert_eq!(identity.role, Role::Patient);
        assert_eq!(identity.email, "pat@example.com");

        let envelope = MockApiResponses::user_envelope(&identity);
        let restored: Identity = serde_json::from_value(envelope["user"].clone()).unwrap();
        assert_eq!(restored, identity);
    }
}
