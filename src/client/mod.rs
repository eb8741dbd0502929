//! HTTP client for the Bluesky XRPC API.

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use crate::error::ApiError;

mod graph;
mod records;
mod session;

pub use graph::{FollowedProfile, FOLLOWS_PAGE_SIZE};
pub use records::CreatedRecord;
pub use session::Session;

pub const DEFAULT_API_URL: &str = "https://bsky.social/xrpc";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct SocialGraphClient {
    client: Client,
    base_url: String,
    session: Option<Session>,
}

impl SocialGraphClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let invalid = |reason: String| ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };

        let parsed = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
        }

        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session: None,
        })
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    fn build_request(
        &self,
        method: Method,
        endpoint: &str,
        authenticated: bool,
    ) -> Result<RequestBuilder, ApiError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let mut request = self.client.request(method, &url);

        if authenticated {
            let session = self.session.as_ref().ok_or(ApiError::NotAuthenticated)?;
            request = request.bearer_auth(&session.access_jwt);
        }

        Ok(request)
    }

    /// Sends the request and returns the body text of a successful response.
    async fn execute(&self, endpoint: &str, request: RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(endpoint, status = status.as_u16(), "xrpc response");

        if status.is_client_error() || status.is_server_error() {
            return Err(ApiError::from_response(status, &body));
        }

        Ok(body)
    }
}

fn decode<T: DeserializeOwned>(body: &str, what: &'static str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|source| ApiError::Decode { what, source })
}
