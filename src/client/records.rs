use chrono::{SecondsFormat, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{decode, SocialGraphClient};
use crate::error::{ApiError, ClientError};

const CREATE_RECORD: &str = "com.atproto.repo.createRecord";

const LIST_COLLECTION: &str = "app.bsky.graph.list";
const LIST_ITEM_COLLECTION: &str = "app.bsky.graph.listitem";
const CURATE_LIST_PURPOSE: &str = "app.bsky.graph.defs#curatelist";

/// Locator and content hash the server assigns to a new record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedRecord {
    pub uri: String,
    pub cid: String,
}

#[derive(Debug, Serialize)]
struct CreateRecord<'a, R> {
    repo: &'a str,
    collection: &'a str,
    record: R,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListRecord<'a> {
    #[serde(rename = "$type")]
    kind: &'a str,
    purpose: &'a str,
    name: &'a str,
    description: &'a str,
    created_at: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListItemRecord<'a> {
    #[serde(rename = "$type")]
    kind: &'a str,
    subject: &'a str,
    list: &'a str,
    created_at: String,
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl<'a> ListRecord<'a> {
    fn curated(name: &'a str) -> Self {
        Self {
            kind: LIST_COLLECTION,
            purpose: CURATE_LIST_PURPOSE,
            name,
            description: "",
            created_at: now_rfc3339(),
        }
    }
}

impl<'a> ListItemRecord<'a> {
    fn new(list: &'a str, subject: &'a str) -> Self {
        Self {
            kind: LIST_ITEM_COLLECTION,
            subject,
            list,
            created_at: now_rfc3339(),
        }
    }
}

impl SocialGraphClient {
    /// Creates an empty curated list in the authenticated account's repo.
    pub async fn create_curated_list(&self, name: &str) -> Result<CreatedRecord, ClientError> {
        let body = self
            .create_record(LIST_COLLECTION, ListRecord::curated(name))
            .await
            .map_err(ClientError::CreateList)?;
        let created: CreatedRecord =
            decode(&body, "create list").map_err(ClientError::CreateList)?;

        tracing::info!(uri = %created.uri, cid = %created.cid, name, "list created");
        Ok(created)
    }

    /// Adds `subject` to the list at `list_uri`. Each call is its own request.
    pub async fn add_member(&self, list_uri: &str, subject: &str) -> Result<(), ClientError> {
        self.create_record(LIST_ITEM_COLLECTION, ListItemRecord::new(list_uri, subject))
            .await
            .map(|_| ())
            .map_err(|error| ClientError::AddMember {
                subject: subject.to_string(),
                error,
            })
    }

    async fn create_record<R: Serialize>(
        &self,
        collection: &str,
        record: R,
    ) -> Result<String, ApiError> {
        let session = self.session().ok_or(ApiError::NotAuthenticated)?;
        let payload = CreateRecord {
            repo: &session.did,
            collection,
            record,
        };

        let request = self
            .build_request(Method::POST, CREATE_RECORD, true)?
            .json(&payload);
        self.execute(CREATE_RECORD, request).await
    }
}
