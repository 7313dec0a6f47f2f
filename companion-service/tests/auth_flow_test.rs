mod common;

use common::{TestApp, FORCE_SSL_SCOPE, TEST_CLIENT_ID, YOUTUBE_SCOPE};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn login_redirects_to_consent_screen() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(app.url("/api/auth/login"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 303);
    let location = response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("Missing Location header")
        .to_string();

    assert!(location.starts_with(&format!("{}/o/oauth2/v2/auth?", app.google.uri())));
    assert!(location.contains(&format!("client_id={}", TEST_CLIENT_ID)));
    assert!(location.contains("response_type=code"));
    assert!(location.contains("access_type=offline"));
    assert!(location.contains("prompt=consent"));
    assert!(location.contains(&urlencoding::encode(FORCE_SSL_SCOPE).into_owned()));
}

#[tokio::test]
async fn callback_caches_identity_and_reports_grant() {
    let app = TestApp::spawn().await;
    app.mock_token_exchange(
        "good-code",
        &format!("{} {}", YOUTUBE_SCOPE, FORCE_SSL_SCOPE),
    )
    .await;

    let response = app
        .client
        .get(app.url("/api/auth/callback?code=good-code"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "YouTube OAuth successful");
    assert_eq!(body["grantedScopes"].as_array().unwrap().len(), 2);

    let identity = app.credentials.current().expect("identity should be cached");
    assert_eq!(identity.bearer_token(), "ya29.exchanged");
    assert_eq!(identity.refresh_token(), Some("1//refresh"));
}

#[tokio::test]
async fn callback_without_code_never_reaches_google() {
    let app = TestApp::spawn().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.google)
        .await;

    let response = app
        .client
        .get(app.url("/api/auth/callback"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
    assert!(app.credentials.current().is_err());
}

#[tokio::test]
async fn rejected_code_leaves_previous_identity_in_place() {
    let app = TestApp::spawn().await;
    app.sign_in(YOUTUBE_SCOPE);
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "invalid_grant",
            "error_description": "Bad Request"
        })))
        .mount(&app.google)
        .await;

    let response = app
        .client
        .get(app.url("/api/auth/callback?code=stale"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("invalid_grant"));
    assert_eq!(app.credentials.current().unwrap().bearer_token(), "ya29.cached");
}

#[tokio::test]
async fn consent_denied_is_a_bad_request() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(app.url("/api/auth/callback?error=access_denied"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn status_reflects_login_and_logout() {
    let app = TestApp::spawn().await;

    let before: serde_json::Value = app
        .client
        .get(app.url("/api/auth/status"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(before["authenticated"], false);
    assert_eq!(before["missingScopes"].as_array().unwrap().len(), 2);

    app.sign_in(YOUTUBE_SCOPE);
    let during: serde_json::Value = app
        .client
        .get(app.url("/api/auth/status"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(during["authenticated"], true);
    assert_eq!(during["missingScopes"], serde_json::json!([FORCE_SSL_SCOPE]));

    let logout = app
        .client
        .post(app.url("/api/auth/logout"))
        .send()
        .await
        .unwrap();
    assert_eq!(logout.status().as_u16(), 200);
    assert!(app.credentials.current().is_err());
}
