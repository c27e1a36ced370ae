use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    multipart::Form,
    Client, Method,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;
use shared_models::error::ClientError;

/// Thin wrapper over the platform REST API. Holds a cookie store so the
/// server-issued session cookie rides along on every call, mirroring a
/// browser client. Cells own their endpoints; this type owns transport and
/// error normalization.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| ClientError::Api(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn json_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    pub async fn request<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making request to {}", url);

        let mut req = self
            .client
            .request(method, &url)
            .headers(Self::json_headers());

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req
            .send()
            .await
            .map_err(|e| ClientError::Api(format!("Request failed: {}", e)))?;

        Self::decode(response).await
    }

    /// Multipart request for the form endpoints (registration, profile and
    /// doctor updates), which may carry an image part.
    pub async fn request_multipart<T>(
        &self,
        method: Method,
        path: &str,
        form: Form,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making multipart request to {}", url);

        let response = self
            .client
            .request(method, &url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ClientError::Api(format!("Request failed: {}", e)))?;

        Self::decode(response).await
    }

    async fn decode<T>(response: reqwest::Response) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("API error ({}): {}", status, error_text);

            let message = extract_server_message(&error_text)
                .unwrap_or_else(|| format!("API error ({})", status));

            return Err(match status.as_u16() {
                401 | 403 => ClientError::Auth(message),
                404 => ClientError::NotFound(message),
                409 => ClientError::Conflict(message),
                _ => ClientError::Api(message),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Api(format!("Unexpected response body: {}", e)))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// The server reports failures as `{"message": "..."}`. That message is
/// surfaced to the user verbatim when present.
fn extract_server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}
