//! Deploy endpoint integration tests.
//!
//! Run with: `cargo test -p zipdeploy-api --test deploy_test`

mod helpers;

use axum_test::multipart::MultipartForm;
use helpers::fixtures::{demo_site_zip, deploy_form, zip_bytes};
use helpers::{
    setup_test_app, setup_vercel_test_app, FakePlatform, MemoryProjectStore, OWNER_HEADER,
    TEST_OWNER_ID,
};
use mockito::Matcher;
use serde_json::Value;
use std::sync::Arc;

#[tokio::test]
async fn test_deploy_success_records_project() {
    let platform = Arc::new(FakePlatform::default());
    let store = Arc::new(MemoryProjectStore::default());
    let app = setup_test_app(platform.clone(), store.clone());

    let response = app
        .client()
        .post("/api/deploy")
        .add_header(OWNER_HEADER, TEST_OWNER_ID)
        .multipart(deploy_form("demo", demo_site_zip()))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["message"], "Deployment berhasil!");
    assert_eq!(body["url"], "https://demo-xyz.example");

    let requests = platform.requests.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].name, "demo");
    let mut paths: Vec<_> = requests[0].files.iter().map(|f| f.path.clone()).collect();
    paths.sort();
    assert_eq!(paths, vec!["assets/app.js", "index.html"]);
    assert!(requests.iter().all(|r| r.files.iter().all(|f| f.decode().is_ok())));

    let records = store.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].owner_id, TEST_OWNER_ID);
    assert_eq!(records[0].name, "demo");
    assert_eq!(records[0].deployment_url, "https://demo-xyz.example");
    assert_eq!(records[0].platform_project_id, "prj_abc");
}

#[tokio::test]
async fn test_legacy_path_accepts_deployments() {
    let platform = Arc::new(FakePlatform::default());
    let store = Arc::new(MemoryProjectStore::default());
    let app = setup_test_app(platform.clone(), store.clone());

    let response = app
        .client()
        .post("/api/deplay")
        .add_header(OWNER_HEADER, TEST_OWNER_ID)
        .multipart(deploy_form("demo", demo_site_zip()))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(platform.calls(), 1);
    assert_eq!(store.records().len(), 1);
}

#[tokio::test]
async fn test_missing_archive_is_rejected_before_deploying() {
    let platform = Arc::new(FakePlatform::default());
    let store = Arc::new(MemoryProjectStore::default());
    let app = setup_test_app(platform.clone(), store.clone());

    let form = MultipartForm::new().add_text("projectName", "demo");
    let response = app
        .client()
        .post("/api/deploy")
        .add_header(OWNER_HEADER, TEST_OWNER_ID)
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["message"], "Nama proyek dan file ZIP harus diunggah.");
    assert_eq!(body["code"], "INVALID_INPUT");
    assert_eq!(platform.calls(), 0);
    assert!(store.records().is_empty());
}

#[tokio::test]
async fn test_blank_project_name_is_rejected() {
    let platform = Arc::new(FakePlatform::default());
    let app = setup_test_app(platform.clone(), Arc::new(MemoryProjectStore::default()));

    let response = app
        .client()
        .post("/api/deploy")
        .add_header(OWNER_HEADER, TEST_OWNER_ID)
        .multipart(deploy_form("   ", demo_site_zip()))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["message"], "Nama proyek dan file ZIP harus diunggah.");
    assert_eq!(platform.calls(), 0);
}

#[tokio::test]
async fn test_non_multipart_body_is_rejected() {
    let platform = Arc::new(FakePlatform::default());
    let app = setup_test_app(platform.clone(), Arc::new(MemoryProjectStore::default()));

    let response = app
        .client()
        .post("/api/deploy")
        .add_header(OWNER_HEADER, TEST_OWNER_ID)
        .json(&serde_json::json!({ "projectName": "demo" }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["message"], "Nama proyek dan file ZIP harus diunggah.");
    assert_eq!(platform.calls(), 0);
}

#[tokio::test]
async fn test_corrupt_archive_is_rejected() {
    let platform = Arc::new(FakePlatform::default());
    let app = setup_test_app(platform.clone(), Arc::new(MemoryProjectStore::default()));

    let response = app
        .client()
        .post("/api/deploy")
        .add_header(OWNER_HEADER, TEST_OWNER_ID)
        .multipart(deploy_form("demo", b"definitely not a zip".to_vec()))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["message"], "File ZIP tidak valid.");
    assert_eq!(body["code"], "CORRUPT_ARCHIVE");
    assert_eq!(platform.calls(), 0);
}

#[tokio::test]
async fn test_directories_only_archive_is_empty_manifest() {
    let platform = Arc::new(FakePlatform::default());
    let app = setup_test_app(platform.clone(), Arc::new(MemoryProjectStore::default()));

    let archive = zip_bytes(&[("public/", None), ("public/css/", None)]);
    let response = app
        .client()
        .post("/api/deploy")
        .add_header(OWNER_HEADER, TEST_OWNER_ID)
        .multipart(deploy_form("demo", archive))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "EMPTY_MANIFEST");
    assert_eq!(
        body["message"],
        "File ZIP kosong atau tidak berisi file yang valid."
    );
    assert_eq!(platform.calls(), 0);
}

#[tokio::test]
async fn test_unsafe_entry_path_is_rejected() {
    let platform = Arc::new(FakePlatform::default());
    let app = setup_test_app(platform.clone(), Arc::new(MemoryProjectStore::default()));

    let archive = zip_bytes(&[
        ("index.html", Some(b"ok")),
        ("../escape.txt", Some(b"nope")),
    ]);
    let response = app
        .client()
        .post("/api/deploy")
        .add_header(OWNER_HEADER, TEST_OWNER_ID)
        .multipart(deploy_form("demo", archive))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
    assert_eq!(platform.calls(), 0);
}

#[tokio::test]
async fn test_rejected_deployment_writes_no_record() {
    let platform = Arc::new(FakePlatform::rejecting(r#"{"error":{"code":"forbidden"}}"#));
    let store = Arc::new(MemoryProjectStore::default());
    let app = setup_test_app(platform.clone(), store.clone());

    let response = app
        .client()
        .post("/api/deploy")
        .add_header(OWNER_HEADER, TEST_OWNER_ID)
        .multipart(deploy_form("demo", demo_site_zip()))
        .await;

    assert_eq!(response.status_code(), 502);
    let body: Value = response.json();
    assert_eq!(body["message"], "Vercel deployment gagal.");
    assert!(body["error"].as_str().unwrap().contains("forbidden"));
    assert_eq!(platform.calls(), 1);
    assert!(store.records().is_empty());
}

#[tokio::test]
async fn test_persistence_failure_still_reports_success() {
    let platform = Arc::new(FakePlatform::default());
    let store = Arc::new(MemoryProjectStore::failing());
    let app = setup_test_app(platform.clone(), store.clone());

    let response = app
        .client()
        .post("/api/deploy")
        .add_header(OWNER_HEADER, TEST_OWNER_ID)
        .multipart(deploy_form("demo", demo_site_zip()))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["message"], "Deployment berhasil!");
    assert_eq!(body["url"], "https://demo-xyz.example");
    assert!(store.records().is_empty());
}

#[tokio::test]
async fn test_other_methods_are_not_allowed() {
    let platform = Arc::new(FakePlatform::default());
    let app = setup_test_app(platform.clone(), Arc::new(MemoryProjectStore::default()));

    let response = app
        .client()
        .get("/api/deploy")
        .add_header(OWNER_HEADER, TEST_OWNER_ID)
        .await;
    assert_eq!(response.status_code(), 405);
    let body: Value = response.json();
    assert_eq!(body["message"], "Method Not Allowed");

    let response = app.client().put("/api/deplay").await;
    assert_eq!(response.status_code(), 405);
    assert_eq!(platform.calls(), 0);
}

#[tokio::test]
async fn test_missing_identity_is_unauthorized() {
    let platform = Arc::new(FakePlatform::default());
    let app = setup_test_app(platform.clone(), Arc::new(MemoryProjectStore::default()));

    let response = app
        .client()
        .post("/api/deploy")
        .multipart(deploy_form("demo", demo_site_zip()))
        .await;

    assert_eq!(response.status_code(), 401);
    let body: Value = response.json();
    assert_eq!(body["code"], "UNAUTHORIZED");
    assert_eq!(platform.calls(), 0);
}

#[tokio::test]
async fn test_missing_input_is_reported_before_missing_identity() {
    let platform = Arc::new(FakePlatform::default());
    let app = setup_test_app(platform.clone(), Arc::new(MemoryProjectStore::default()));

    let form = MultipartForm::new().add_text("projectName", "demo");
    let response = app.client().post("/api/deploy").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
    assert_eq!(body["message"], "Nama proyek dan file ZIP harus diunggah.");

    let response = app
        .client()
        .post("/api/deploy")
        .json(&serde_json::json!({ "projectName": "demo" }))
        .await;
    assert_eq!(response.status_code(), 400);
    assert_eq!(platform.calls(), 0);
}

#[tokio::test]
async fn test_missing_token_makes_no_platform_call() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let app = setup_vercel_test_app(&server.url(), None);

    let response = app
        .client()
        .post("/api/deploy")
        .add_header(OWNER_HEADER, TEST_OWNER_ID)
        .multipart(deploy_form("demo", demo_site_zip()))
        .await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["message"], "Token Vercel tidak ditemukan.");
    assert_eq!(body["code"], "MISSING_CREDENTIAL");
    mock.assert_async().await;
    assert!(app.store.records().is_empty());
}

#[tokio::test]
async fn test_vercel_round_trip_uses_alias_as_url() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v13/deployments")
        .match_header("authorization", "Bearer test-token")
        .match_body(Matcher::PartialJson(serde_json::json!({ "name": "demo" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"dpl_42","alias":["demo-xyz.vercel.app"]}"#)
        .create_async()
        .await;
    let app = setup_vercel_test_app(&server.url(), Some("test-token"));

    let response = app
        .client()
        .post("/api/deploy")
        .add_header(OWNER_HEADER, TEST_OWNER_ID)
        .multipart(deploy_form("demo", demo_site_zip()))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["url"], "https://demo-xyz.vercel.app");
    mock.assert_async().await;

    let records = app.store.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].platform_project_id, "dpl_42");
}

#[tokio::test]
async fn test_vercel_rejection_body_is_surfaced() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v13/deployments")
        .with_status(400)
        .with_body(r#"{"error":{"code":"bad_request","message":"Invalid files"}}"#)
        .create_async()
        .await;
    let app = setup_vercel_test_app(&server.url(), Some("test-token"));

    let response = app
        .client()
        .post("/api/deploy")
        .add_header(OWNER_HEADER, TEST_OWNER_ID)
        .multipart(deploy_form("demo", demo_site_zip()))
        .await;

    assert_eq!(response.status_code(), 502);
    let body: Value = response.json();
    assert_eq!(body["code"], "DEPLOYMENT_REJECTED");
    assert!(body["error"].as_str().unwrap().contains("Invalid files"));
    assert!(app.store.records().is_empty());
}

#[tokio::test]
async fn test_health_and_openapi_are_served() {
    let app = setup_test_app(
        Arc::new(FakePlatform::default()),
        Arc::new(MemoryProjectStore::default()),
    );

    let response = app.client().get("/health").await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "alive");

    let response = app.client().get("/api/openapi.json").await;
    assert_eq!(response.status_code(), 200);
    let spec: Value = response.json();
    assert!(spec["paths"]["/api/deploy"]["post"].is_object());
}

#[tokio::test]
async fn test_oversized_upload_is_rejected() {
    let platform = Arc::new(FakePlatform::default());
    let app = setup_test_app(platform.clone(), Arc::new(MemoryProjectStore::default()));

    // test_config caps uploads at 1 MiB
    let oversized = vec![0u8; 2 * 1024 * 1024];
    let response = app
        .client()
        .post("/api/deploy")
        .add_header(OWNER_HEADER, TEST_OWNER_ID)
        .multipart(deploy_form("demo", oversized))
        .await;

    assert_eq!(response.status_code(), 413);
    assert_eq!(platform.calls(), 0);
}
