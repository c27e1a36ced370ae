/// An image attached to a multipart form (registration, profile or doctor
/// updates). The bytes travel as a named file part.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Lifecycle of an asynchronous request as observed by the UI. Every cache
/// carries one of these instead of ad hoc loading/error booleans, so
/// suspension and failure states stay uniformly testable.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed(String),
}

impl RequestState {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending)
    }

    pub fn failure_message(&self) -> Option<&str> {
        match self {
            RequestState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}
