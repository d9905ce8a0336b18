use super::*;

fn test_client(base_url: &str) -> NeynarClient {
    NeynarClient::with_base_url("test-key", 30, "chanscope-test/0.1", base_url)
        .expect("client construction should not fail")
}

#[test]
fn feed_url_without_cursor() {
    let client = test_client("https://api.neynar.com/v2/farcaster");
    let url = client.feed_url("celo", 100, None).unwrap();
    assert_eq!(
        url.as_str(),
        "https://api.neynar.com/v2/farcaster/feed?feed_type=filter&filter_type=channel_id&channel_id=celo&limit=100"
    );
}

#[test]
fn feed_url_with_cursor() {
    let client = test_client("https://api.neynar.com/v2/farcaster/");
    let url = client.feed_url("celo", 25, Some("eyJ0aW1lc3RhbXAiOjF9")).unwrap();
    assert_eq!(
        url.as_str(),
        "https://api.neynar.com/v2/farcaster/feed?feed_type=filter&filter_type=channel_id&channel_id=celo&limit=25&cursor=eyJ0aW1lc3RhbXAiOjF9"
    );
}

#[test]
fn feed_url_collapses_repeated_trailing_slashes() {
    let client = test_client("http://127.0.0.1:8080///");
    let url = client.feed_url("base", 5, None).unwrap();
    assert!(
        url.as_str().starts_with("http://127.0.0.1:8080/feed?"),
        "unexpected url: {url}"
    );
}

#[test]
fn feed_url_encodes_cursor_characters() {
    let client = test_client("https://api.neynar.com/v2/farcaster");
    let url = client.feed_url("celo", 100, Some("a+b/c=")).unwrap();
    assert!(
        url.as_str().ends_with("cursor=a%2Bb%2Fc%3D"),
        "cursor should be percent-encoded: {url}"
    );
}

#[test]
fn with_base_url_rejects_invalid_url() {
    let result = NeynarClient::with_base_url("k", 30, "ua", "not a url");
    assert!(
        matches!(result, Err(CollectorError::InvalidBaseUrl { .. })),
        "expected InvalidBaseUrl"
    );
}
