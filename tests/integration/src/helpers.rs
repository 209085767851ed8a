//! Test helpers for integration tests
//!
//! Provides a test server with in-memory banner stores, a controllable
//! clock, and thin HTTP request wrappers.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use fleet_api::{create_app, AppState};
use fleet_common::AppConfig;
use fleet_core::{Banner, BannerKind, FixedClock};
use fleet_db::MemoryBannerRepository;
use fleet_service::ServiceContext;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Bearer token every test server is configured with
pub const ADMIN_TOKEN: &str = "integration-admin-token";

/// The instant test servers start their clock at
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub clock: Arc<FixedClock>,
    pub site: Arc<MemoryBannerRepository>,
    pub ads: Arc<MemoryBannerRepository>,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server with the default test configuration
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config(&[])?).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let clock = Arc::new(FixedClock::new(test_now()));
        let site = Arc::new(MemoryBannerRepository::new(BannerKind::Site));
        let ads = Arc::new(MemoryBannerRepository::new(BannerKind::Ad));

        let service_context = ServiceContext::builder()
            .site_repo(site.clone())
            .ad_repo(ads.clone())
            .clock(clock.clone())
            .override_window_hours(config.reconcile.override_window_hours)
            .build()?;

        // Build application
        let app = create_app(AppState::new(service_context, config))?;

        // Bind to an ephemeral port
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        // Spawn server task
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Create HTTP client
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            clock,
            site,
            ads,
            _handle: handle,
        })
    }

    /// The in-memory store behind `kind`
    pub fn repo(&self, kind: BannerKind) -> &MemoryBannerRepository {
        match kind {
            BannerKind::Site => &self.site,
            BannerKind::Ad => &self.ads,
        }
    }

    /// Put banners straight into the store, bypassing the API
    pub fn seed(&self, banners: impl IntoIterator<Item = Banner>) {
        for banner in banners {
            self.repo(banner.kind).insert_all([banner]);
        }
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a GET request with the admin token
    pub async fn get_admin(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).bearer_auth(ADMIN_TOKEN).send().await?)
    }

    /// Make a POST request with the admin token and a JSON body
    pub async fn post_admin<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .bearer_auth(ADMIN_TOKEN)
            .json(body)
            .send()
            .await?)
    }

    /// Make a POST request with the admin token and no body
    pub async fn post_admin_empty(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).bearer_auth(ADMIN_TOKEN).send().await?)
    }

    /// Make a PATCH request with the admin token
    pub async fn patch_admin<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .patch(&url)
            .bearer_auth(ADMIN_TOKEN)
            .json(body)
            .send()
            .await?)
    }

    /// Make a PUT request with the admin token
    pub async fn put_admin<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .put(&url)
            .bearer_auth(ADMIN_TOKEN)
            .json(body)
            .send()
            .await?)
    }

    /// Make a DELETE request with the admin token
    pub async fn delete_admin(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.delete(&url).bearer_auth(ADMIN_TOKEN).send().await?)
    }
}

/// Create a test configuration
///
/// The scheduler is disabled and the admin token set; `overrides` replace
/// or add variables on top.
pub fn test_config(overrides: &[(&str, &str)]) -> Result<AppConfig> {
    let mut vars: HashMap<String, String> = [
        ("API_PORT", "0"),
        ("ADMIN_API_TOKEN", ADMIN_TOKEN),
        ("RECONCILE_ENABLED", "false"),
        ("RATE_LIMIT_BURST", "1000"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    for (k, v) in overrides {
        vars.insert((*k).to_string(), (*v).to_string());
    }

    let config = AppConfig::from_lookup(|key| vars.get(key).cloned())
        .map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    Ok(config)
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
