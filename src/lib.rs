//! Copies the accounts a Bluesky user follows into a new curated list.

pub mod cli;
pub mod client;
pub mod config;
pub mod copy;
pub mod display;
pub mod error;
pub mod logging;

pub use client::{CreatedRecord, FollowedProfile, Session, SocialGraphClient};
pub use copy::{copy_follows, CopyOutcome, CopyRequest, CopySummary, FailedMember};
pub use error::{ApiError, ClientError};
