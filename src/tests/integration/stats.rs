use super::{assert_error_body, json_body, routes_from_disk, routes_with_provider};
use crate::tests::{
    config::{test_config, test_config_with_log_dir},
    fixtures::{
        StaticStatsProvider, StatsDir, POOL_STATUS, TESTNET_ADDRESS, USER_STATUS, VALID_ADDRESS,
        VALID_LEGACY_ADDRESS,
    },
};
use std::sync::Arc;
use std::time::Duration;
use warp::http::StatusCode;
use warp::test::request;

#[tokio::test]
async fn test_pool_stats_from_disk() {
    let dir = StatsDir::new();
    dir.write_pool_status(POOL_STATUS);
    let routes = routes_from_disk(test_config_with_log_dir(dir.path()));

    let response = request().method("GET").path("/v1/pool").reply(&routes).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "application/json");

    let body = json_body(&response);
    assert_eq!(body["runtime"], 100);
    assert_eq!(body["lastupdate"], 200);
    assert_eq!(body["users"], 5);
    assert_eq!(body["workers"], 12);
    assert_eq!(body["disconnected"], 1);
    assert_eq!(body["hashrate1m"], "10G");
    assert_eq!(body["hashrate7d"], "7G");
    assert_eq!(body["diff"], 1024.5);
    assert_eq!(body["accepted"], 99);
    assert_eq!(body["bestshare"], 5000);
    assert_eq!(body["sps1m"], 1.1);
    assert_eq!(body["sps1h"], 0.8);

    // Only the lowercase names are emitted
    assert!(body.get("Users").is_none());
    assert!(body.get("SPS1m").is_none());
}

#[tokio::test]
async fn test_pool_stats_missing_file_is_500() {
    let dir = StatsDir::new();
    let routes = routes_from_disk(test_config_with_log_dir(dir.path()));

    let response = request().path("/v1/pool").reply(&routes).await;

    assert_error_body(&response, 500);
    let body = json_body(&response);
    assert!(!body.to_string().contains(&dir.path().display().to_string()));
}

#[tokio::test]
async fn test_pool_stats_short_file_is_500() {
    let dir = StatsDir::new();
    dir.write_pool_status("{\"Users\":5}\n{\"hashrate1m\":\"10G\"}");
    let routes = routes_from_disk(test_config_with_log_dir(dir.path()));

    let response = request().path("/v1/pool").reply(&routes).await;

    assert_error_body(&response, 500);
}

#[tokio::test]
async fn test_user_stats_from_disk() {
    let dir = StatsDir::new();
    dir.write_user_status(VALID_ADDRESS, USER_STATUS);
    let routes = routes_from_disk(test_config_with_log_dir(dir.path()));

    let response = request()
        .path(&format!("/v1/users/{}", VALID_ADDRESS))
        .reply(&routes)
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(&response);
    assert_eq!(body["hashrate1m"], "5T");
    assert_eq!(body["workers"], 2);
    assert_eq!(body["bestshare"], 12345.6);

    let workers = body["worker"].as_array().unwrap();
    assert_eq!(workers.len(), 2);
    assert_eq!(workers[0]["workername"], "rig1");
    assert_eq!(workers[1]["workername"], "rig2");
}

#[tokio::test]
async fn test_unknown_user_is_500() {
    let dir = StatsDir::new();
    let routes = routes_from_disk(test_config_with_log_dir(dir.path()));

    let response = request()
        .path(&format!("/v1/users/{}", VALID_LEGACY_ADDRESS))
        .reply(&routes)
        .await;

    assert_error_body(&response, 500);
}

#[tokio::test]
async fn test_invalid_address_is_400_without_provider_call() {
    let provider = Arc::new(StaticStatsProvider::new());
    let routes = routes_with_provider(test_config(), provider.clone());

    for address in ["not-an-address", TESTNET_ADDRESS, "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNb"] {
        let response = request()
            .path(&format!("/v1/users/{}", address))
            .reply(&routes)
            .await;
        assert_error_body(&response, 400);
    }

    assert_eq!(provider.user_calls(), 0);
}

#[tokio::test]
async fn test_path_traversal_address_is_rejected() {
    let provider = Arc::new(StaticStatsProvider::new());
    let routes = routes_with_provider(test_config(), provider.clone());

    let response = request().path("/v1/users/..%2F..%2Fetc%2Fpasswd").reply(&routes).await;

    assert_error_body(&response, 400);
    assert_eq!(provider.user_calls(), 0);
}

#[tokio::test]
async fn test_provider_failure_is_500() {
    let provider = Arc::new(StaticStatsProvider::failing());
    let routes = routes_with_provider(test_config(), provider.clone());

    let response = request().path("/v1/pool").reply(&routes).await;
    assert_error_body(&response, 500);

    let response = request()
        .path(&format!("/v1/users/{}", VALID_ADDRESS))
        .reply(&routes)
        .await;
    assert_error_body(&response, 500);
}

#[tokio::test]
async fn test_rate_limit_rejects_after_burst() {
    let provider = Arc::new(StaticStatsProvider::new());
    let mut config = test_config();
    config.rate_limit.enabled = true;
    config.rate_limit.requests_per_second = 0.01;
    config.rate_limit.burst_size = 2;
    let routes = routes_with_provider(config, provider.clone());

    for _ in 0..2 {
        let response = request().path("/v1/pool").reply(&routes).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = request().path("/v1/pool").reply(&routes).await;
    assert_error_body(&response, 429);
    assert_eq!(json_body(&response)["error"]["message"], "Rate limit exceeded. Slow down!");

    // The bucket is shared by every route
    let response = request()
        .path(&format!("/v1/users/{}", VALID_ADDRESS))
        .reply(&routes)
        .await;
    assert_error_body(&response, 429);

    assert_eq!(provider.pool_calls(), 2);
    assert_eq!(provider.user_calls(), 0);
}

#[tokio::test]
async fn test_invalid_address_does_not_consume_rate_limit() {
    let provider = Arc::new(StaticStatsProvider::new());
    let mut config = test_config();
    config.rate_limit.enabled = true;
    config.rate_limit.requests_per_second = 0.01;
    config.rate_limit.burst_size = 1;
    let routes = routes_with_provider(config, provider.clone());

    let response = request().path("/v1/users/garbage").reply(&routes).await;
    assert_error_body(&response, 400);

    let response = request()
        .path(&format!("/v1/users/{}", VALID_ADDRESS))
        .reply(&routes)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_rate_limited_request_is_not_served_from_cache() {
    let provider = Arc::new(StaticStatsProvider::new());
    let mut config = test_config();
    config.cache.enabled = true;
    config.rate_limit.enabled = true;
    config.rate_limit.requests_per_second = 0.01;
    config.rate_limit.burst_size = 1;
    let routes = routes_with_provider(config, provider.clone());

    let response = request().path("/v1/pool").reply(&routes).await;
    assert_eq!(response.status(), StatusCode::OK);

    // A cached entry exists, but the limiter runs first
    let response = request().path("/v1/pool").reply(&routes).await;
    assert_error_body(&response, 429);
}

#[tokio::test]
async fn test_cache_hit_is_byte_identical_and_skips_provider() {
    let provider = Arc::new(StaticStatsProvider::new());
    let mut config = test_config();
    config.cache.enabled = true;
    config.cache.ttl_seconds = 60;
    let routes = routes_with_provider(config, provider.clone());

    let first = request().path("/v1/pool").reply(&routes).await;
    let second = request().path("/v1/pool").reply(&routes).await;

    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(first.body(), second.body());
    assert_eq!(second.headers()["content-type"], "application/json");
    assert_eq!(provider.pool_calls(), 1);

    // A different query is a different cache entry
    let third = request().path("/v1/pool?fresh=1").reply(&routes).await;
    assert_eq!(third.status(), StatusCode::OK);
    assert_eq!(provider.pool_calls(), 2);
}

#[tokio::test]
async fn test_cache_expires_after_ttl() {
    let provider = Arc::new(StaticStatsProvider::new());
    let mut config = test_config();
    config.cache.enabled = true;
    config.cache.ttl_seconds = 1;
    let routes = routes_with_provider(config, provider.clone());

    let path = format!("/v1/users/{}", VALID_ADDRESS);
    request().path(&path).reply(&routes).await;
    request().path(&path).reply(&routes).await;
    assert_eq!(provider.user_calls(), 1);

    tokio::time::sleep(Duration::from_millis(1100)).await;

    let response = request().path(&path).reply(&routes).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(provider.user_calls(), 2);
}

#[tokio::test]
async fn test_errors_are_not_cached() {
    let dir = StatsDir::new();
    let mut config = test_config_with_log_dir(dir.path());
    config.cache.enabled = true;
    let routes = routes_from_disk(config);

    let response = request().path("/v1/pool").reply(&routes).await;
    assert_error_body(&response, 500);

    dir.write_pool_status(POOL_STATUS);
    let response = request().path("/v1/pool").reply(&routes).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(&response)["users"], 5);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let routes = routes_with_provider(test_config(), Arc::new(StaticStatsProvider::new()));

    let response = request().path("/v2/pool").reply(&routes).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_oversized_body_is_413_before_rate_limit() {
    let mut config = test_config();
    config.server.max_request_size = 1024;
    config.rate_limit.enabled = true;
    config.rate_limit.requests_per_second = 0.01;
    config.rate_limit.burst_size = 1;
    let provider = Arc::new(StaticStatsProvider::new());
    let routes = routes_with_provider(config, provider.clone());

    let response = request()
        .path("/v1/pool")
        .body(vec![b'x'; 64 * 1024])
        .reply(&routes)
        .await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(provider.pool_calls(), 0);

    let response = request()
        .path(&format!("/v1/users/{}", VALID_ADDRESS))
        .body(vec![b'x'; 2048])
        .reply(&routes)
        .await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

    // The refused requests never reached the limiter
    let response = request().path("/v1/pool").body("ok").reply(&routes).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(provider.pool_calls(), 1);
}
