use reqwest::Method;
use serde::Deserialize;

use super::{decode, SocialGraphClient};
use crate::error::{ApiError, ClientError};

const GET_FOLLOWS: &str = "app.bsky.graph.getFollows";

/// Page size requested from `getFollows`.
pub const FOLLOWS_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowedProfile {
    pub did: String,
    pub handle: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FollowsPage {
    #[serde(default)]
    follows: Vec<FollowedProfile>,
    #[serde(default)]
    cursor: Option<String>,
}

impl SocialGraphClient {
    /// Collects every account `actor` follows.
    pub async fn list_follows(&self, actor: &str) -> Result<Vec<FollowedProfile>, ClientError> {
        self.list_follows_with_progress(actor, |_| {}).await
    }

    /// Like [`list_follows`](Self::list_follows), reporting the running total
    /// after each page.
    pub async fn list_follows_with_progress<F>(
        &self,
        actor: &str,
        mut on_page: F,
    ) -> Result<Vec<FollowedProfile>, ClientError>
    where
        F: FnMut(usize),
    {
        let mut follows = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let page = self
                .follows_page(actor, cursor.as_deref())
                .await
                .map_err(ClientError::Fetch)?;

            follows.extend(page.follows);
            on_page(follows.len());

            // An empty cursor ends the listing the same as a missing one.
            match page.cursor.filter(|c| !c.is_empty()) {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        tracing::debug!(actor, total = follows.len(), "follows listed");
        Ok(follows)
    }

    async fn follows_page(&self, actor: &str, cursor: Option<&str>) -> Result<FollowsPage, ApiError> {
        let limit = FOLLOWS_PAGE_SIZE.to_string();
        let mut query = vec![("actor", actor), ("limit", limit.as_str())];
        if let Some(cursor) = cursor {
            query.push(("cursor", cursor));
        }

        tracing::debug!(actor, cursor, "requesting follows page");

        let request = self
            .build_request(Method::GET, GET_FOLLOWS, true)?
            .query(&query);
        let body = self.execute(GET_FOLLOWS, request).await?;

        decode(&body, "follows")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_tolerates_missing_fields() {
        let page: FollowsPage = serde_json::from_str(r#"{"follows":[]}"#).unwrap();
        assert!(page.follows.is_empty());
        assert!(page.cursor.is_none());

        let page: FollowsPage = serde_json::from_str(
            r#"{"follows":[{"did":"did:plc:a","handle":"a.bsky.social","displayName":"A"}],"cursor":"next"}"#,
        )
        .unwrap();
        assert_eq!(page.follows[0].display_name.as_deref(), Some("A"));
        assert_eq!(page.cursor.as_deref(), Some("next"));
    }
}
