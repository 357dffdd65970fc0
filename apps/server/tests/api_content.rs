//! Static content API tests.

mod common;

use axum_test::TestServer;

use common::TestContext;

/// Test health check.
#[tokio::test]
async fn test_health_check() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "OK");
}

/// Test the sound introduction lists every vowel alphabetically.
#[tokio::test]
async fn test_introduction_sorted() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server.get("/api/introduction").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let cards = body.as_array().unwrap();

    assert_eq!(cards.len(), 15);
    assert_eq!(cards[0]["name"], "acorn");
    assert_eq!(cards[14]["name"], "umbrella");
    assert_eq!(cards[0]["isolated_sound"], "audio/acorn/vowel_sound_only.mp3");
}

/// Test the sub-level tables.
#[tokio::test]
async fn test_levels() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server.get("/api/levels").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();

    let familiarization = body["familiarization"].as_array().unwrap();
    let distinction = body["distinction"].as_array().unwrap();
    assert_eq!(familiarization.len(), 5);
    assert_eq!(distinction.len(), 26);
    assert_eq!(familiarization[0]["id"], "1A");
    assert_eq!(familiarization[0]["round_count"], 7);
    assert_eq!(
        familiarization[0]["vowels"],
        serde_json::json!(["alligator", "elephant", "pin"])
    );
    assert_eq!(distinction[25]["id"], "2.7.F");
}
