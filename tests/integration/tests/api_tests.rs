//! API Integration Tests
//!
//! Each test spawns its own server on a loopback port with in-memory banner
//! stores and a fixed clock, so no external services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use chrono::Duration;
use fleet_core::BannerKind;
use integration_tests::{
    assert_json, assert_status, fixtures::*, test_config, test_now, TestServer,
};
use reqwest::StatusCode;
use serde_json::json;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/banners/site").await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Admin Auth Tests
// ============================================================================

#[tokio::test]
async fn test_admin_requires_token() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/v1/admin/banners/site").await.unwrap();
    let err: ErrorView = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(err.error.code, "MISSING_AUTHORIZATION");

    let response = server
        .client
        .get(format!("{}/api/v1/admin/banners/site", server.base_url()))
        .bearer_auth("not-the-token")
        .send()
        .await
        .unwrap();
    let err: ErrorView = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(err.error.code, "INVALID_TOKEN");
}

#[tokio::test]
async fn test_admin_is_open_without_configured_token() {
    let config = test_config(&[("ADMIN_API_TOKEN", "")]).unwrap();
    let server = TestServer::start_with_config(config).await.unwrap();

    let response = server.get("/api/v1/admin/banners/ad").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_public_feed_needs_no_token() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/banners/ad").await.unwrap();
    let banners: Vec<PublicBannerView> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(banners.is_empty());
}

#[tokio::test]
async fn test_unknown_kind_is_not_found() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/v1/banners/popup").await.unwrap();
    let err: ErrorView = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(err.error.code, "UNKNOWN_BANNER_KIND");

    let response = server.get_admin("/api/v1/admin/banners/popup").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Banner Management Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_get_banner() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = CreateBanner::unique().window(
        Some("2024-05-01T00:00:00Z"),
        Some("2024-07-01T00:00:00+02:00"),
    );

    let response = server
        .post_admin("/api/v1/admin/banners/site", &request)
        .await
        .unwrap();
    let created: BannerView = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(created.kind, "site");
    assert_eq!(created.title, request.title);
    assert_eq!(created.image_url, request.image_url);
    assert_eq!(created.redirect_url, request.redirect_url);
    assert!(created.active);
    assert_eq!(created.status, "active");
    assert!(created.manually_deactivated_at.is_none());
    assert!(!created.override_active);
    assert_eq!(
        created.end_date.unwrap().to_rfc3339(),
        "2024-06-30T22:00:00+00:00"
    );

    let response = server
        .get_admin(&format!("/api/v1/admin/banners/site/{}", created.id))
        .await
        .unwrap();
    let fetched: BannerView = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.start_date, created.start_date);
}

#[tokio::test]
async fn test_kinds_are_separate_stores() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post_admin("/api/v1/admin/banners/ad", &CreateBanner::unique())
        .await
        .unwrap();
    let created: BannerView = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.kind, "ad");

    let response = server
        .get_admin(&format!("/api/v1/admin/banners/site/{}", created.id))
        .await
        .unwrap();
    let err: ErrorView = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(err.error.code, "UNKNOWN_BANNER");

    assert_eq!(server.ads.len(), 1);
    assert!(server.site.is_empty());
}

#[tokio::test]
async fn test_create_inactive_banner_starts_override() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = CreateBanner::unique().inactive();

    let response = server
        .post_admin("/api/v1/admin/banners/site", &request)
        .await
        .unwrap();
    let created: BannerView = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert!(!created.active);
    assert_eq!(created.status, "paused");
    assert_eq!(created.manually_deactivated_at, Some(test_now()));
    assert!(created.override_active);
}

#[tokio::test]
async fn test_create_rejects_inverted_range() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = CreateBanner::unique().window(Some("2024-07-01T00:00:00Z"), Some("2024-06-01T00:00:00Z"));

    let response = server
        .post_admin("/api/v1/admin/banners/site", &request)
        .await
        .unwrap();
    let err: ErrorView = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(err.error.code, "INVALID_DATE_RANGE");
    assert!(server.site.is_empty());
}

#[tokio::test]
async fn test_create_rejects_equal_bounds() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = CreateBanner::unique().window(Some("2024-07-01T00:00:00Z"), Some("2024-07-01T00:00:00Z"));

    let response = server
        .post_admin("/api/v1/admin/banners/ad", &request)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_unparseable_date_names_the_field() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = CreateBanner::unique().window(Some("2024-06-01T00:00:00Z"), Some("next tuesday"));

    let response = server
        .post_admin("/api/v1/admin/banners/site", &request)
        .await
        .unwrap();
    let err: ErrorView = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(err.error.code, "INVALID_DATE_RANGE");
    assert_eq!(err.error.details, Some(json!({ "field": "end_date" })));
}

#[tokio::test]
async fn test_create_validates_body() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post_admin("/api/v1/admin/banners/site", &json!({ "image_url": "" }))
        .await
        .unwrap();
    let err: ErrorView = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(err.error.code, "VALIDATION_ERROR");

    let response = server
        .post_admin("/api/v1/admin/banners/site", &json!({ "title": "no image" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_update_clears_and_sets_dates() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = CreateBanner::unique().window(Some("2024-05-01T00:00:00Z"), Some("2024-05-31T00:00:00Z"));
    let response = server
        .post_admin("/api/v1/admin/banners/site", &request)
        .await
        .unwrap();
    let created: BannerView = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.status, "expired");

    // Explicit null clears the end; an absent start is kept
    let path = format!("/api/v1/admin/banners/site/{}", created.id);
    let response = server
        .patch_admin(&path, &json!({ "end_date": null, "title": "Summer" }))
        .await
        .unwrap();
    let updated: BannerView = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(updated.end_date.is_none());
    assert_eq!(updated.start_date, created.start_date);
    assert_eq!(updated.title.as_deref(), Some("Summer"));
    assert_eq!(updated.status, "active");

    // The merged range is checked against the stored start
    let response = server
        .patch_admin(&path, &json!({ "end_date": "2024-04-01T00:00:00Z" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_update_missing_banner() {
    let server = TestServer::start().await.expect("Failed to start server");
    let missing = scheduled_banner(BannerKind::Site, true, None, None).id;

    let response = server
        .patch_admin(&format!("/api/v1/admin/banners/site/{missing}"), &json!({ "title": "x" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_malformed_banner_id() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .get_admin("/api/v1/admin/banners/site/not-an-id")
        .await
        .unwrap();
    let err: ErrorView = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(err.error.code, "INVALID_PATH_PARAMETER");
}

#[tokio::test]
async fn test_delete_banner() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post_admin("/api/v1/admin/banners/ad", &CreateBanner::unique())
        .await
        .unwrap();
    let created: BannerView = assert_json(response, StatusCode::CREATED).await.unwrap();
    let path = format!("/api/v1/admin/banners/ad/{}", created.id);

    let response = server.delete_admin(&path).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get_admin(&path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.delete_admin(&path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_admin_list_shows_every_status() {
    let server = TestServer::start().await.expect("Failed to start server");
    server.seed([
        scheduled_banner(BannerKind::Site, true, Some(Duration::days(1)), None),
        scheduled_banner(BannerKind::Site, true, None, Some(-Duration::days(1))),
        scheduled_banner(BannerKind::Site, false, None, None),
        scheduled_banner(BannerKind::Site, true, None, None),
    ]);

    let response = server.get_admin("/api/v1/admin/banners/site").await.unwrap();
    let banners: Vec<BannerView> = assert_json(response, StatusCode::OK).await.unwrap();

    let mut statuses: Vec<&str> = banners.iter().map(|b| b.status.as_str()).collect();
    statuses.sort_unstable();
    assert_eq!(statuses, vec!["expired", "no_schedule", "paused", "scheduled"]);
}

// ============================================================================
// Public Display Tests
// ============================================================================

#[tokio::test]
async fn test_public_feed_applies_schedule() {
    let server = TestServer::start().await.expect("Failed to start server");
    let live = scheduled_banner(BannerKind::Site, true, Some(-Duration::days(1)), Some(Duration::days(1)));
    let unbounded = scheduled_banner(BannerKind::Site, true, None, None);
    let upcoming = scheduled_banner(BannerKind::Site, true, Some(Duration::hours(1)), None);
    // Flag still on but the window closed; hidden without waiting for reconciliation
    let lapsed = scheduled_banner(BannerKind::Site, true, None, Some(-Duration::minutes(1)));
    let paused = scheduled_banner(BannerKind::Site, false, None, None);
    server.seed([live.clone(), unbounded.clone(), upcoming, lapsed, paused]);

    let response = server.get("/api/v1/banners/site").await.unwrap();
    let banners: Vec<PublicBannerView> = assert_json(response, StatusCode::OK).await.unwrap();

    let mut ids: Vec<String> = banners.iter().map(|b| b.id.clone()).collect();
    ids.sort();
    let mut expected = vec![live.id.to_string(), unbounded.id.to_string()];
    expected.sort();
    assert_eq!(ids, expected);
    assert!(banners.iter().all(|b| b.kind == "site"));
}

#[tokio::test]
async fn test_public_feed_follows_the_clock() {
    let server = TestServer::start().await.expect("Failed to start server");
    server.seed([scheduled_banner(BannerKind::Ad, true, Some(Duration::hours(2)), Some(Duration::hours(4)))]);

    let visible = |server: &TestServer| {
        let url = format!("{}/api/v1/banners/ad", server.base_url());
        let client = server.client.clone();
        async move {
            let response = client.get(url).send().await.unwrap();
            let banners: Vec<PublicBannerView> = assert_json(response, StatusCode::OK).await.unwrap();
            banners.len()
        }
    };

    assert_eq!(visible(&server).await, 0);
    server.clock.advance(Duration::hours(2));
    assert_eq!(visible(&server).await, 1);
    server.clock.advance(Duration::hours(2));
    assert_eq!(visible(&server).await, 0);
}

// ============================================================================
// Manual Override and Reconciliation Tests
// ============================================================================

#[tokio::test]
async fn test_reconcile_realigns_flags() {
    let server = TestServer::start().await.expect("Failed to start server");
    let dormant = scheduled_banner(BannerKind::Site, false, Some(-Duration::days(1)), None);
    let lingering = scheduled_banner(BannerKind::Ad, true, None, Some(-Duration::hours(1)));
    let unscheduled = scheduled_banner(BannerKind::Ad, false, None, None);
    server.seed([dormant.clone(), lingering.clone(), unscheduled.clone()]);

    let response = server.post_admin_empty("/api/v1/admin/reconcile").await.unwrap();
    let summary: ReconcileView = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(summary.started_at, test_now());
    assert_eq!(summary.checked, 2);
    assert_eq!(summary.activated, 1);
    assert_eq!(summary.deactivated, 1);
    assert_eq!(summary.skipped, 0);
    assert!(summary.errors.is_empty());
    assert!(server.site.get(dormant.id).unwrap().active);
    assert!(!server.ads.get(lingering.id).unwrap().active);
    assert!(!server.ads.get(unscheduled.id).unwrap().active);

    // Second run finds nothing to do
    let response = server.post_admin_empty("/api/v1/admin/reconcile").await.unwrap();
    let summary: ReconcileView = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(summary.activated + summary.deactivated, 0);
    assert_eq!(summary.unchanged, 2);
}

#[tokio::test]
async fn test_manual_deactivation_survives_reconcile_for_a_day() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = CreateBanner::unique().window(Some("2024-05-01T00:00:00Z"), None);
    let response = server
        .post_admin("/api/v1/admin/banners/site", &request)
        .await
        .unwrap();
    let created: BannerView = assert_json(response, StatusCode::CREATED).await.unwrap();
    let path = format!("/api/v1/admin/banners/site/{}/active", created.id);

    let response = server.put_admin(&path, &json!({ "active": false })).await.unwrap();
    let paused: BannerView = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!paused.active);
    assert_eq!(paused.manually_deactivated_at, Some(test_now()));
    assert!(paused.override_active);

    // One hour later the override still holds
    server.clock.advance(Duration::hours(1));
    let response = server.post_admin_empty("/api/v1/admin/reconcile").await.unwrap();
    let summary: ReconcileView = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.skipped_ids, vec![created.id.clone()]);

    // Past the window reconciliation turns it back on
    server.clock.advance(Duration::hours(24));
    let response = server.post_admin_empty("/api/v1/admin/reconcile").await.unwrap();
    let summary: ReconcileView = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.activated, 1);

    let response = server
        .get_admin(&format!("/api/v1/admin/banners/site/{}", created.id))
        .await
        .unwrap();
    let banner: BannerView = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(banner.active);
    assert!(!banner.override_active);
}

#[tokio::test]
async fn test_patch_with_unchanged_inactive_flag_still_pauses() {
    let server = TestServer::start().await.expect("Failed to start server");
    // Switched off by an earlier reconcile once its window closed: no stamp
    let expired = scheduled_banner(BannerKind::Site, false, None, Some(-Duration::days(1)));
    server.seed([expired.clone()]);
    let path = format!("/api/v1/admin/banners/site/{}", expired.id);

    let response = server
        .patch_admin(&path, &json!({ "end_date": "2024-06-10T00:00:00Z", "active": false }))
        .await
        .unwrap();
    let updated: BannerView = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!updated.active);
    assert_eq!(updated.manually_deactivated_at, Some(test_now()));
    assert!(updated.override_active);

    let response = server.post_admin_empty("/api/v1/admin/reconcile").await.unwrap();
    let summary: ReconcileView = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(summary.activated, 0);
    assert_eq!(summary.skipped_ids, vec![expired.id.to_string()]);
    assert!(!server.repo(BannerKind::Site).get(expired.id).unwrap().active);
}

#[tokio::test]
async fn test_manual_activation_clears_stamp() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post_admin("/api/v1/admin/banners/ad", &CreateBanner::unique().inactive())
        .await
        .unwrap();
    let created: BannerView = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .put_admin(
            &format!("/api/v1/admin/banners/ad/{}/active", created.id),
            &json!({ "active": true }),
        )
        .await
        .unwrap();
    let banner: BannerView = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(banner.active);
    assert!(banner.manually_deactivated_at.is_none());
    assert_eq!(banner.status, "no_schedule");
}

#[tokio::test]
async fn test_shorter_override_window_from_config() {
    let config = test_config(&[("RECONCILE_OVERRIDE_WINDOW_HOURS", "2")]).unwrap();
    let server = TestServer::start_with_config(config).await.unwrap();

    let mut banner = scheduled_banner(BannerKind::Site, true, Some(-Duration::days(1)), None);
    banner.set_active_manually(false, test_now() - Duration::hours(3));
    server.seed([banner.clone()]);

    let response = server.post_admin_empty("/api/v1/admin/reconcile").await.unwrap();
    let summary: ReconcileView = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(summary.activated, 1);
    assert!(server.site.get(banner.id).unwrap().active);
}

#[tokio::test]
async fn test_reconcile_load_failure_is_server_error() {
    let server = TestServer::start().await.expect("Failed to start server");
    server.seed([scheduled_banner(BannerKind::Site, false, Some(-Duration::days(1)), None)]);
    server.ads.fail_list_scheduled(Some("connection reset"));

    let response = server.post_admin_empty("/api/v1/admin/reconcile").await.unwrap();
    assert_status(response, StatusCode::INTERNAL_SERVER_ERROR).await.unwrap();
    assert_eq!(server.site.update_active_calls(), 0);
}
