mod common;

use common::TestApp;

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(app.url("/health"))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    assert!(response.headers().contains_key("x-request-id"));

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "companion-service");
}

#[tokio::test]
async fn readiness_check_works() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(app.url("/ready"))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
}

#[tokio::test]
async fn config_check_reports_presence_only() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(app.url("/api/config-check"))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    let text = response.text().await.unwrap();
    assert!(!text.contains("test-secret"));
    assert!(!text.contains("gsk-test"));

    let body: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["youtubeClientIdSet"], true);
    assert_eq!(body["youtubeClientSecretSet"], true);
    assert_eq!(body["groqApiKeySet"], true);
}

#[tokio::test]
async fn cors_allows_the_dashboard_origin_with_credentials() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .request(reqwest::Method::OPTIONS, app.url("/api/video/update"))
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "PUT")
        .header("access-control-request-headers", "content-type")
        .send()
        .await
        .expect("Failed to execute request");

    let headers = response.headers();
    assert_eq!(
        headers.get("access-control-allow-origin").unwrap(),
        "http://localhost:3000"
    );
    assert_eq!(
        headers.get("access-control-allow-credentials").unwrap(),
        "true"
    );
}
