use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{decode, SocialGraphClient};
use crate::error::ClientError;

const CREATE_SESSION: &str = "com.atproto.server.createSession";

/// Credentials held for the rest of the run. Never refreshed.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_jwt: String,
    pub did: String,
    pub handle: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("did", &self.did)
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct CreateSession<'a> {
    identifier: &'a str,
    password: &'a str,
}

impl SocialGraphClient {
    /// Exchanges a handle and app password for a session.
    ///
    /// Any previously held session is dropped first, so a failed attempt
    /// leaves the client unauthenticated.
    pub async fn authenticate(
        &mut self,
        identifier: &str,
        password: &str,
    ) -> Result<&Session, ClientError> {
        self.session = None;

        let payload = CreateSession {
            identifier,
            password,
        };

        let request = self
            .build_request(Method::POST, CREATE_SESSION, false)
            .map_err(ClientError::Auth)?
            .json(&payload);
        let body = self
            .execute(CREATE_SESSION, request)
            .await
            .map_err(ClientError::Auth)?;
        let session: Session = decode(&body, "session").map_err(ClientError::Auth)?;

        tracing::info!(did = %session.did, handle = %session.handle, "session created");

        Ok(&*self.session.insert(session))
    }
}
