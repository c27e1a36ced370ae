use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde_json::json;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use shared_api::ApiClient;
use shared_config::AppConfig;
use shared_models::error::ClientError;
use shared_models::identity::Identity;

use crate::models::{LoginRequest, RegisterForm, SessionEvent, SessionState, UserEnvelope};
use crate::storage::SessionFile;

/// Owner of the authenticated identity.
///
/// Memory and the persisted session file move together: every write to one
/// is mirrored to the other, and nothing else writes the file. Dependent
/// caches follow along through the event channel rather than reading
/// storage themselves.
pub struct SessionStore {
    api: Arc<ApiClient>,
    file: SessionFile,
    state: RwLock<SessionState>,
    // Bumped on every user-initiated identity change; in-flight refreshes
    // compare against it before applying their result.
    epoch: AtomicU64,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionStore {
    pub fn new(api: Arc<ApiClient>, config: &AppConfig) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            api,
            file: SessionFile::new(config.session_file.clone()),
            state: RwLock::new(SessionState::Unauthenticated),
            epoch: AtomicU64::new(0),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn state(&self) -> SessionState {
        self.state.read().unwrap().clone()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.state.read().unwrap().identity().cloned()
    }

    /// Rehydrate the persisted identity, if any. Synchronous: by the time
    /// this returns, the optimistic in-memory assignment is visible, so
    /// navigation logic never observes a guest view for a logged-in user.
    /// The authoritative re-verification happens in the background, driven
    /// by the emitted `SignedIn` event.
    pub fn bootstrap(&self) {
        match self.file.load() {
            Some(identity) => {
                info!("Restored persisted session for {}", identity.email);
                self.install(identity, false);
            }
            None => debug!("No persisted session found"),
        }
    }

    pub async fn login(&self, credentials: LoginRequest) -> Result<Identity, ClientError> {
        credentials.validate()?;

        self.set_state(SessionState::Authenticating);
        debug!("Logging in {}", credentials.email);

        let result: Result<UserEnvelope, ClientError> = self
            .api
            .request(
                Method::POST,
                "/auth/login",
                Some(json!({
                    "email": credentials.email,
                    "password": credentials.password,
                })),
            )
            .await;

        self.finish_authentication(result, "Login failed")
    }

    pub async fn register(&self, form: RegisterForm) -> Result<Identity, ClientError> {
        form.validate()?;

        self.set_state(SessionState::Authenticating);
        debug!("Registering {}", form.email);

        let mut multipart = Form::new()
            .text("name", form.name)
            .text("email", form.email)
            .text("phone", form.phone)
            .text("password", form.password)
            .text("age", form.age.to_string())
            .text("gender", form.gender)
            .text("address", form.address)
            .text("role", form.role.to_string());

        if let Some(image) = form.image {
            multipart = multipart.part("image", Part::bytes(image.bytes).file_name(image.file_name));
        }

        let result: Result<UserEnvelope, ClientError> = self
            .api
            .request_multipart(Method::POST, "/auth/register", multipart)
            .await;

        self.finish_authentication(result, "Signup failed")
    }

    /// Re-fetch the identity from the server. A payload overwrites memory
    /// and the file; an empty success leaves state alone; a failure parks
    /// the store in `RefreshFailed` with the last known identity intact. A
    /// result that arrives after a logout or re-login is discarded.
    pub async fn refresh_identity(&self) -> Result<(), ClientError> {
        let epoch = self.epoch.load(Ordering::SeqCst);
        debug!("Re-verifying identity against the server");

        let result: Result<UserEnvelope, ClientError> =
            self.api.request(Method::GET, "/users/profile/me", None).await;

        if self.epoch.load(Ordering::SeqCst) != epoch {
            debug!("Session changed mid-refresh, discarding result");
            return Ok(());
        }

        match result {
            Ok(UserEnvelope { user: Some(identity) }) => {
                if let Err(e) = self.file.save(&identity) {
                    warn!("Failed to persist refreshed identity: {}", e);
                }
                *self.state.write().unwrap() = SessionState::Authenticated(identity.clone());
                let _ = self.events.send(SessionEvent::Refreshed(identity));
                Ok(())
            }
            Ok(UserEnvelope { user: None }) => Ok(()),
            Err(e) => {
                let mut state = self.state.write().unwrap();
                if let Some(identity) = state.identity().cloned() {
                    *state = SessionState::RefreshFailed(identity);
                }
                warn!("Identity refresh failed: {}", e);
                Err(e)
            }
        }
    }

    /// Unconditional and synchronous. Clears memory and the session file
    /// without consulting the server; logging out cannot fail from the
    /// client's perspective, and doing it twice is harmless.
    pub fn logout(&self) {
        info!("Logging out");
        self.epoch.fetch_add(1, Ordering::SeqCst);
        *self.state.write().unwrap() = SessionState::Unauthenticated;
        self.file.clear();
        let _ = self.events.send(SessionEvent::SignedOut);
    }

    fn finish_authentication(
        &self,
        result: Result<UserEnvelope, ClientError>,
        fallback: &str,
    ) -> Result<Identity, ClientError> {
        match result {
            Ok(UserEnvelope { user: Some(identity) }) => {
                info!("Authenticated as {} ({})", identity.email, identity.role);
                self.install(identity.clone(), true);
                Ok(identity)
            }
            Ok(UserEnvelope { user: None }) => {
                self.set_state(SessionState::Unauthenticated);
                Err(ClientError::Api(fallback.to_string()))
            }
            Err(e) => {
                self.set_state(SessionState::Unauthenticated);
                Err(e)
            }
        }
    }

    fn install(&self, identity: Identity, persist: bool) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        if persist {
            if let Err(e) = self.file.save(&identity) {
                warn!("Failed to persist session: {}", e);
            }
        }
        *self.state.write().unwrap() = SessionState::Authenticated(identity.clone());
        let _ = self.events.send(SessionEvent::SignedIn(identity));
    }

    fn set_state(&self, next: SessionState) {
        *self.state.write().unwrap() = next;
    }
}
