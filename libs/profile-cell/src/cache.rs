use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use tracing::{debug, warn};

use session_cell::sync::ProfileRefresher;
use shared_api::ApiClient;
use shared_config::AppConfig;
use shared_models::error::ClientError;
use shared_models::identity::Identity;
use shared_models::request::RequestState;
use shared_utils::image::normalize_image;

use crate::models::{Profile, UpdateProfileForm};

#[derive(Debug, Default)]
struct Inner {
    profile: Option<Profile>,
    state: RequestState,
}

/// Cache of the signed-in patient's profile. Images are normalized at
/// ingestion, so consumers always see a hosted URL.
pub struct ProfileCache {
    api: Arc<ApiClient>,
    asset_base_url: String,
    inner: RwLock<Inner>,
}

impl ProfileCache {
    pub fn new(api: Arc<ApiClient>, config: &AppConfig) -> Self {
        Self {
            api,
            asset_base_url: config.asset_base_url.clone(),
            inner: RwLock::new(Inner::default()),
        }
    }

    pub fn profile(&self) -> Option<Profile> {
        self.inner.read().unwrap().profile.clone()
    }

    pub fn state(&self) -> RequestState {
        self.inner.read().unwrap().state.clone()
    }

    pub async fn fetch(&self) -> Result<Profile, ClientError> {
        debug!("Fetching my profile");
        self.set_pending();

        let result: Result<Profile, ClientError> = self
            .api
            .request(Method::GET, "/users/profile/me", None)
            .await;

        self.ingest(result)
    }

    pub async fn update(&self, form: UpdateProfileForm) -> Result<Profile, ClientError> {
        debug!("Updating my profile");
        self.set_pending();

        let mut multipart = Form::new();
        if let Some(name) = form.name {
            multipart = multipart.text("name", name);
        }
        if let Some(phone) = form.phone {
            multipart = multipart.text("phone", phone);
        }
        if let Some(age) = form.age {
            multipart = multipart.text("age", age.to_string());
        }
        if let Some(gender) = form.gender {
            multipart = multipart.text("gender", gender);
        }
        if let Some(address) = form.address {
            multipart = multipart.text("address", address);
        }
        if let Some(image) = form.image {
            multipart = multipart.part("image", Part::bytes(image.bytes).file_name(image.file_name));
        }

        let result: Result<Profile, ClientError> = self
            .api
            .request_multipart(Method::PUT, "/users/profile/me", multipart)
            .await;

        self.ingest(result)
    }

    /// Deletes the account server-side and drops the cached profile. The
    /// session itself is cleared by the caller via the session store.
    pub async fn delete_account(&self) -> Result<(), ClientError> {
        debug!("Deleting my account");

        let result: Result<serde_json::Value, ClientError> =
            self.api.request(Method::DELETE, "/users/me", None).await;

        let mut inner = self.inner.write().unwrap();
        match result {
            Ok(_) => {
                inner.profile = None;
                inner.state = RequestState::Succeeded;
                Ok(())
            }
            Err(e) => {
                inner.state = RequestState::Failed(e.message().to_string());
                Err(e)
            }
        }
    }

    pub fn clear(&self) {
        let mut inner = self.inner.write().unwrap();
        inner.profile = None;
        inner.state = RequestState::Idle;
    }

    fn set_pending(&self) {
        self.inner.write().unwrap().state = RequestState::Pending;
    }

    fn ingest(&self, result: Result<Profile, ClientError>) -> Result<Profile, ClientError> {
        let mut inner = self.inner.write().unwrap();
        match result {
            Ok(mut profile) => {
                profile.image = Some(normalize_image(profile.image.as_ref(), &self.asset_base_url));
                inner.profile = Some(profile.clone());
                inner.state = RequestState::Succeeded;
                Ok(profile)
            }
            Err(e) => {
                inner.state = RequestState::Failed(e.message().to_string());
                Err(e)
            }
        }
    }
}

#[async_trait]
impl ProfileRefresher for ProfileCache {
    async fn refresh_for(&self, identity: &Identity) -> Result<(), ClientError> {
        debug!("Refreshing profile for {}", identity.id);
        match self.fetch().await {
            Ok(_) => Ok(()),
            Err(e) => {
                warn!("Profile refresh for {} failed: {}", identity.id, e);
                Err(e)
            }
        }
    }
}
