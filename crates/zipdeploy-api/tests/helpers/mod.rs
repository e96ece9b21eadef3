//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p zipdeploy-api --test deploy_test`.
//! The metadata store is in memory; the platform is either a recording fake or the
//! real Vercel client pointed at a mockito server.

#![allow(dead_code)]

pub mod fixtures;

use async_trait::async_trait;
use axum_test::TestServer;
use std::sync::{Arc, Mutex};
use zipdeploy_api::setup::routes;
use zipdeploy_api::state::AppState;
use zipdeploy_core::models::{DeploymentRequest, DeploymentResult, ProjectRecord};
use zipdeploy_core::{AppError, ArchivePathPolicy, Config, VercelConfig};
use zipdeploy_db::ProjectStore;
use zipdeploy_services::{DeploymentPipeline, DeploymentPlatform, VercelClient};

pub const TEST_OWNER_ID: &str = "user-123";
pub const OWNER_HEADER: &str = "x-user-id";

/// Platform double that records every request it receives.
#[derive(Default)]
pub struct FakePlatform {
    pub requests: Mutex<Vec<DeploymentRequest>>,
    pub reject_with: Option<String>,
}

impl FakePlatform {
    pub fn rejecting(details: &str) -> Self {
        Self {
            reject_with: Some(details.to_string()),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl DeploymentPlatform for FakePlatform {
    async fn deploy(&self, request: &DeploymentRequest) -> Result<DeploymentResult, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(details) = &self.reject_with {
            return Err(AppError::DeploymentRejected {
                details: details.clone(),
            });
        }
        Ok(DeploymentResult {
            url: "https://demo-xyz.example".to_string(),
            platform_project_id: "prj_abc".to_string(),
        })
    }
}

/// In-memory metadata store; `failing()` refuses every insert.
#[derive(Default)]
pub struct MemoryProjectStore {
    pub records: Mutex<Vec<ProjectRecord>>,
    pub fail: bool,
}

impl MemoryProjectStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn records(&self) -> Vec<ProjectRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProjectStore for MemoryProjectStore {
    async fn insert_project(&self, record: &ProjectRecord) -> Result<(), AppError> {
        if self.fail {
            return Err(AppError::PersistenceFailure {
                details: "connection refused".to_string(),
            });
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

pub fn test_config() -> Config {
    Config {
        environment: "test".to_string(),
        max_upload_size_bytes: 1024 * 1024,
        ..Config::default()
    }
}

/// Test application: server plus handles on its collaborators.
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryProjectStore>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn build_test_app(
    config: Config,
    platform: Arc<dyn DeploymentPlatform>,
    store: Arc<MemoryProjectStore>,
) -> TestApp {
    let pipeline = DeploymentPipeline::new(platform, store.clone(), ArchivePathPolicy::RejectUnsafe);
    let state = Arc::new(AppState::new(config.clone(), pipeline));
    let router = routes::setup_routes(&config, state).expect("Failed to build routes");
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp { server, store }
}

/// App backed by a recording fake platform.
pub fn setup_test_app(platform: Arc<FakePlatform>, store: Arc<MemoryProjectStore>) -> TestApp {
    build_test_app(test_config(), platform, store)
}

/// App backed by the real Vercel client talking to `api_url`.
pub fn setup_vercel_test_app(api_url: &str, token: Option<&str>) -> TestApp {
    let vercel = VercelConfig {
        token: token.map(str::to_string),
        api_url: api_url.to_string(),
        team_id: None,
        timeout_secs: 5,
    };
    let config = Config {
        vercel: vercel.clone(),
        ..test_config()
    };
    let client = VercelClient::new(&vercel).expect("Failed to create Vercel client");
    build_test_app(config, Arc::new(client), Arc::new(MemoryProjectStore::default()))
}
