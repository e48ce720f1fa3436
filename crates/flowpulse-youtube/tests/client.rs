//! Integration tests for `YoutubeClient` using wiremock HTTP mocks.

use flowpulse_youtube::{video_to_item, YoutubeClient, YoutubeError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> YoutubeClient {
    YoutubeClient::with_base_url("test-key", 30, "flowpulse-test/0.1", 0, 0, base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn search_returns_video_ids() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "kind": "youtube#searchListResponse",
        "items": [
            { "id": { "kind": "youtube#video", "videoId": "vid-1" } },
            { "id": { "kind": "youtube#channel", "channelId": "chan-1" } },
            { "id": { "kind": "youtube#video", "videoId": "vid-2" } }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("key", "test-key"))
        .and(query_param("type", "video"))
        .and(query_param("q", "n8n workflow"))
        .and(query_param("regionCode", "US"))
        .and(query_param("maxResults", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let ids = client
        .search_video_ids("n8n workflow", "US", 25)
        .await
        .expect("should parse search results");

    assert_eq!(ids, ["vid-1", "vid-2"], "channel entries are dropped");
}

#[tokio::test]
async fn fetch_video_stats_parses_string_counters() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "kind": "youtube#videoListResponse",
        "items": [
            {
                "id": "vid-1",
                "snippet": { "title": "n8n workflow tutorial" },
                "statistics": {
                    "viewCount": "1000",
                    "likeCount": "100",
                    "commentCount": "10"
                }
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("part", "statistics,snippet"))
        .and(query_param("id", "vid-1,vid-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let videos = client
        .fetch_video_stats(&["vid-1".to_string(), "vid-2".to_string()])
        .await
        .expect("should parse videos");

    assert_eq!(videos.len(), 1);
    let item = video_to_item(&videos[0]).expect("item");
    assert_eq!(item.source_id, "vid-1");
    assert_eq!(item.metrics.views, 1000);
    assert_eq!(item.metrics.likes, 100);
    assert_eq!(item.metrics.comments, 10);
}

#[tokio::test]
async fn empty_id_list_skips_the_request() {
    // No mock mounted: a request would fail the test with a connect error.
    let client = test_client("http://127.0.0.1:9");
    let videos = client
        .fetch_video_stats(&[])
        .await
        .expect("empty input should not hit the network");
    assert!(videos.is_empty());
}

#[tokio::test]
async fn quota_reason_in_403_maps_to_quota_exceeded() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "error": {
            "code": 403,
            "message": "The request cannot be completed because you have exceeded your quota.",
            "errors": [
                { "reason": "quotaExceeded", "domain": "youtube.quota" }
            ]
        }
    });

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(403).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .search_video_ids("n8n workflow", "US", 25)
        .await
        .unwrap_err();

    assert!(
        matches!(err, YoutubeError::QuotaExceeded(_)),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn http_429_maps_to_quota_exceeded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .fetch_video_stats(&["vid-1".to_string()])
        .await
        .unwrap_err();

    assert!(matches!(err, YoutubeError::QuotaExceeded(_)));
}

#[tokio::test]
async fn non_quota_403_maps_to_api_error() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "error": {
            "code": 403,
            "message": "The request is missing a valid API key.",
            "errors": [
                { "reason": "forbidden", "domain": "global" }
            ]
        }
    });

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(403).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .search_video_ids("n8n workflow", "US", 25)
        .await
        .unwrap_err();

    assert!(matches!(err, YoutubeError::ApiError(_)));
}

#[tokio::test]
async fn malformed_body_maps_to_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .search_video_ids("n8n workflow", "US", 25)
        .await
        .unwrap_err();

    assert!(matches!(err, YoutubeError::Deserialize { .. }));
}
