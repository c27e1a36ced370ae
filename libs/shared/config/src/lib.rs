use std::env;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub asset_base_url: String,
    pub session_file: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let api_base_url = env::var("CARESYNC_API_URL").unwrap_or_else(|_| {
            warn!("CARESYNC_API_URL not set, using empty value");
            String::new()
        });

        let config = Self {
            // Image paths returned by the API are relative to the asset host,
            // which defaults to the API host itself.
            asset_base_url: env::var("CARESYNC_ASSET_URL")
                .unwrap_or_else(|_| api_base_url.clone()),
            session_file: env::var("CARESYNC_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    warn!("CARESYNC_SESSION_FILE not set, using default");
                    PathBuf::from(".caresync_session.json")
                }),
            api_base_url,
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.api_base_url.is_empty()
    }
}
