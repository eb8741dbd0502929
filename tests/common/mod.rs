#![allow(dead_code)]

use httpmock::prelude::*;
use httpmock::Mock;
use serde_json::{json, Value};

pub const ACCESS_JWT: &str = "access-jwt";
pub const BEARER: &str = "Bearer access-jwt";
pub const MY_DID: &str = "did:plc:me";
pub const MY_HANDLE: &str = "me.bsky.social";
pub const LIST_URI: &str = "at://did:plc:me/app.bsky.graph.list/3kabc";

pub const SESSION_PATH: &str = "/xrpc/com.atproto.server.createSession";
pub const FOLLOWS_PATH: &str = "/xrpc/app.bsky.graph.getFollows";
pub const RECORD_PATH: &str = "/xrpc/com.atproto.repo.createRecord";

pub fn api_url(server: &MockServer) -> String {
    server.url("/xrpc")
}

pub async fn mock_session(server: &MockServer) -> Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(POST).path(SESSION_PATH);
            then.status(200).json_body(json!({
                "accessJwt": ACCESS_JWT,
                "refreshJwt": "refresh-jwt",
                "did": MY_DID,
                "handle": MY_HANDLE
            }));
        })
        .await
}

pub async fn mock_create_list(server: &MockServer) -> Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path(RECORD_PATH)
                .header("authorization", BEARER)
                .json_body_partial(r#"{"collection":"app.bsky.graph.list"}"#);
            then.status(200)
                .json_body(json!({ "uri": LIST_URI, "cid": "bafylist" }));
        })
        .await
}

/// Matches follows requests that carry no cursor, i.e. the first page.
pub fn without_cursor(req: &HttpMockRequest) -> bool {
    req.query_params
        .as_ref()
        .map_or(true, |params| params.iter().all(|(key, _)| key != "cursor"))
}

pub fn profile(n: usize) -> Value {
    json!({
        "did": format!("did:plc:user{n}"),
        "handle": format!("user{n}.bsky.social"),
        "displayName": format!("User {n}")
    })
}

pub fn profiles(range: std::ops::Range<usize>) -> Vec<Value> {
    range.map(profile).collect()
}
