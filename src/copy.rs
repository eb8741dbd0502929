//! The copy run: authenticate, read the target's follows, create the list,
//! then add every followed account to it.
//!
//! Only membership failures are tolerated. Everything else ends the run.

use std::time::Duration;

use crate::client::{CreatedRecord, SocialGraphClient};
use crate::display::Progress;
use crate::error::ClientError;

#[derive(Debug, Clone)]
pub struct CopyRequest<'a> {
    pub identifier: &'a str,
    pub password: &'a str,
    pub target: &'a str,
    pub list_name: &'a str,
    pub member_delay: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedMember {
    pub handle: String,
    pub did: String,
    pub error: String,
}

#[derive(Debug, Clone)]
pub struct CopySummary {
    /// Handle of the account that owns the new list.
    pub account_handle: String,
    pub list: CreatedRecord,
    pub total: usize,
    pub added: usize,
    pub failed: Vec<FailedMember>,
}

#[derive(Debug, Clone)]
pub enum CopyOutcome {
    /// The target follows nobody; no list was created.
    NoFollows,
    Copied(CopySummary),
}

pub async fn copy_follows(
    client: &mut SocialGraphClient,
    request: &CopyRequest<'_>,
    progress: &mut Progress,
) -> Result<CopyOutcome, ClientError> {
    progress.step("Authenticating...");
    let account_handle = client
        .authenticate(request.identifier, request.password)
        .await?
        .handle
        .clone();

    progress.step(&format!("Fetching follows for {}...", request.target));
    let follows = client
        .list_follows_with_progress(request.target, |total| progress.fetched(total))
        .await?;

    if follows.is_empty() {
        progress.no_follows();
        return Ok(CopyOutcome::NoFollows);
    }
    progress.found(follows.len());

    progress.step(&format!("Creating list \"{}\"...", request.list_name));
    let list = client.create_curated_list(request.list_name).await?;

    progress.step("Adding members to list...");
    let total = follows.len();
    let mut added = 0;
    let mut failed = Vec::new();

    for (i, follow) in follows.iter().enumerate() {
        match client.add_member(&list.uri, &follow.did).await {
            Ok(()) => {
                added += 1;
                progress.added(i + 1, total);
            }
            Err(e) => {
                tracing::warn!(handle = %follow.handle, did = %follow.did, error = %e, "failed to add member");
                progress.member_failed(&follow.handle, &e.to_string());
                failed.push(FailedMember {
                    handle: follow.handle.clone(),
                    did: follow.did.clone(),
                    error: e.to_string(),
                });
            }
        }

        tokio::time::sleep(request.member_delay).await;
    }

    let summary = CopySummary {
        account_handle,
        list,
        total,
        added,
        failed,
    };
    progress.done(request.list_name, &summary);

    Ok(CopyOutcome::Copied(summary))
}
