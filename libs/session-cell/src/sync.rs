use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use shared_models::error::ClientError;
use shared_models::identity::Identity;

use crate::models::SessionEvent;
use crate::store::SessionStore;

/// Seam between the session and the profile cache, so the orchestrator can
/// be exercised without dragging the real cache in.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRefresher: Send + Sync {
    async fn refresh_for(&self, identity: &Identity) -> Result<(), ClientError>;
}

/// Listens for session transitions and issues the dependent fetches.
///
/// Per `SignedIn` — exactly one per transition into `Authenticated` — it
/// schedules a background identity re-verification and, for patient-like
/// roles, a profile refresh. Both apply opportunistically: failures are
/// logged, never escalated, and never force navigation.
pub struct SessionSync {
    store: Arc<SessionStore>,
    profiles: Arc<dyn ProfileRefresher>,
}

impl SessionSync {
    pub fn new(store: Arc<SessionStore>, profiles: Arc<dyn ProfileRefresher>) -> Self {
        Self { store, profiles }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        let mut events = self.store.subscribe();
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => self.handle(event).await,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Session event stream lagged, skipped {}", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }

    async fn handle(&self, event: SessionEvent) {
        match event {
            SessionEvent::SignedIn(identity) => {
                let store = Arc::clone(&self.store);
                tokio::spawn(async move {
                    if let Err(e) = store.refresh_identity().await {
                        warn!("Background identity refresh failed: {}", e);
                    }
                });

                if identity.role.is_patient_like() {
                    if let Err(e) = self.profiles.refresh_for(&identity).await {
                        warn!("Profile refresh failed: {}", e);
                    }
                }
            }
            SessionEvent::Refreshed(identity) => {
                debug!("Identity refreshed for {}", identity.email);
            }
            SessionEvent::SignedOut => debug!("Signed out"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use shared_api::ApiClient;
    use shared_models::identity::Role;
    use shared_utils::test_utils::{MockApiResponses, TestConfig, TestIdentity};

    use crate::models::LoginRequest;

    fn store_for(server: &MockServer, dir: &tempfile::TempDir) -> Arc<SessionStore> {
        let config = TestConfig::for_server(&server.uri())
            .with_session_file(dir.path().join("session.json"))
            .to_app_config();
        let api = Arc::new(ApiClient::new(&config).unwrap());
        Arc::new(SessionStore::new(api, &config))
    }

    fn mount_login(server: &MockServer, identity: &shared_models::identity::Identity) -> Mock {
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(MockApiResponses::user_envelope(identity)),
            )
    }

    #[tokio::test]
    async fn patient_login_triggers_refresh_and_profile_fetch() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let identity = TestIdentity::patient("pat@example.com").to_identity();

        mount_login(&server, &identity).mount(&server).await;
        Mock::given(method("GET"))
            .and(path("/users/profile/me"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(MockApiResponses::user_envelope(&identity)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let store = store_for(&server, &dir);

        let mut profiles = MockProfileRefresher::new();
        profiles
            .expect_refresh_for()
            .times(1)
            .returning(|_| Ok(()));

        let handle = SessionSync::new(Arc::clone(&store), Arc::new(profiles)).spawn();

        store
            .login(LoginRequest {
                email: "pat@example.com".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap();

        // Give the spawned refresh and the event loop a moment to drain.
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.abort();
    }

    #[tokio::test]
    async fn doctor_login_skips_profile_fetch() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let identity = TestIdentity::doctor("doc@example.com").to_identity();

        mount_login(&server, &identity).mount(&server).await;
        Mock::given(method("GET"))
            .and(path("/users/profile/me"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "user": null })),
            )
            .mount(&server)
            .await;

        let store = store_for(&server, &dir);

        let mut profiles = MockProfileRefresher::new();
        profiles.expect_refresh_for().times(0);

        let handle = SessionSync::new(Arc::clone(&store), Arc::new(profiles)).spawn();

        let logged_in = store
            .login(LoginRequest {
                email: "doc@example.com".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(logged_in.role, Role::Doctor);

        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.abort();
    }
}
