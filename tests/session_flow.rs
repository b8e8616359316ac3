#![allow(clippy::unwrap_used, clippy::expect_used)]

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use smartclaim::api::{ApiConfig, FileTokenStore, TokenStore};
use smartclaim::features::auth::state::{SessionContext, SessionState};
use smartclaim::components::table::OutputFormat;
use smartclaim::routes::{login, settings, HistoryNavigator, Navigator, Route, View};
use std::net::TcpListener;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

fn user_json() -> serde_json::Value {
    json!({
        "id": "7d1f5a0e-2c55-4a43-9a4f-1b9d7f0c2e11",
        "name": "Asha",
        "phone": "5551234567",
        "email": null,
        "language_preference": "en",
        "created_at": "2025-01-10T08:30:00"
    })
}

fn context(base_url: &str, store: Arc<dyn TokenStore>) -> (SessionContext, Arc<HistoryNavigator>) {
    let navigator = Arc::new(HistoryNavigator::default());
    let ctx = SessionContext::new(
        ApiConfig::with_base_url(base_url),
        store,
        Arc::clone(&navigator) as Arc<dyn Navigator>,
    )
    .expect("session context");
    (ctx, navigator)
}

#[tokio::test]
async fn token_survives_restart_then_expires() -> anyhow::Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let dir = tempfile::tempdir()?;
    let token_path = dir.path().join("nested").join("session.json");
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .and(body_json(json!({"phone": "5551234567", "password": "secret1"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "tok-1", "token_type": "bearer"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/auth/me"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .mount(&server)
        .await;

    // First run: sign in through the login page.
    let (ctx, navigator) = context(&server.uri(), Arc::new(FileTokenStore::new(&token_path)));
    let form = login::LoginForm {
        phone: "(555) 123-4567".to_string(),
        password: SecretString::from("secret1".to_string()),
    };
    let view = login::submit(&ctx, &form).await;
    assert!(view.error_message().is_none(), "{view:?}");
    assert_eq!(navigator.history(), vec![Route::Overview]);
    assert!(token_path.exists());

    // Second run: the persisted token restores the session.
    let store = Arc::new(FileTokenStore::new(&token_path));
    assert_eq!(
        store.load()?.map(|token| token.expose_secret().to_string()),
        Some("tok-1".to_string())
    );
    let (ctx, _) = context(&server.uri(), store);
    assert_eq!(ctx.init_auth().await, SessionState::Authenticated);
    assert_eq!(ctx.user().map(|user| user.name), Some("Asha".to_string()));

    // Server revokes the token: any protected call resets the session once.
    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/policies/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Token expired"})))
        .mount(&server)
        .await;

    let (ctx, navigator) = context(&server.uri(), Arc::new(FileTokenStore::new(&token_path)));
    let result = smartclaim::features::policies::client::list_policies(ctx.client()).await;
    assert_eq!(result.unwrap_err().status(), Some(401));
    assert_eq!(navigator.history(), vec![Route::Login]);
    assert!(!ctx.is_authenticated());
    assert!(FileTokenStore::new(&token_path).load()?.is_none());
    Ok(())
}

#[tokio::test]
async fn logout_clears_persisted_token() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let token_path = dir.path().join("session.json");
    let store = FileTokenStore::new(&token_path);
    store.save(&SecretString::from("tok-2".to_string()))?;

    let (ctx, navigator) = context("http://127.0.0.1:9", Arc::new(store));
    ctx.logout()?;

    assert_eq!(ctx.state(), SessionState::Unauthenticated);
    assert_eq!(navigator.history(), vec![Route::Login]);
    assert!(FileTokenStore::new(&token_path).load()?.is_none());
    Ok(())
}

#[tokio::test]
async fn rejected_login_shows_server_detail() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"detail": "Incorrect phone number or password"})),
        )
        .mount(&server)
        .await;

    let (ctx, navigator) = context(
        &server.uri(),
        Arc::new(smartclaim::api::MemoryTokenStore::default()),
    );
    let form = login::LoginForm {
        phone: "5551234567".to_string(),
        password: SecretString::from("wrong".to_string()),
    };
    let view = login::submit(&ctx, &form).await;

    assert!(matches!(view, View::Page { .. }));
    assert_eq!(
        view.error_message().as_deref(),
        Some("Incorrect phone number or password")
    );
    assert!(navigator.history().is_empty());
    assert_eq!(
        ctx.snapshot().error.as_deref(),
        Some("Incorrect phone number or password")
    );
}

#[tokio::test]
async fn check_auth_accepts_valid_token() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/auth/me"))
        .and(header("authorization", "Bearer live"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(smartclaim::api::MemoryTokenStore::with_token("live"));
    let (ctx, navigator) = context(&server.uri(), store.clone());

    assert_eq!(ctx.check_auth().await, SessionState::Authenticated);
    assert!(ctx.is_authenticated());
    assert_eq!(ctx.user().map(|user| user.phone), Some("5551234567".to_string()));
    assert!(store.load().unwrap().is_some());
    assert!(navigator.history().is_empty());
}

#[tokio::test]
async fn check_auth_drops_rejected_token() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/auth/me"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"detail": "Could not validate credentials"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(smartclaim::api::MemoryTokenStore::with_token("revoked"));
    let (ctx, navigator) = context(&server.uri(), store.clone());

    assert_eq!(ctx.check_auth().await, SessionState::Unauthenticated);
    assert!(!ctx.is_authenticated());
    assert!(ctx.snapshot().token.is_none());
    assert!(store.load().unwrap().is_none());
    assert_eq!(navigator.history(), vec![Route::Login]);
}

#[tokio::test]
async fn status_page_reports_signed_out_after_rejection() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/auth/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let (ctx, _) = context(
        &server.uri(),
        Arc::new(smartclaim::api::MemoryTokenStore::with_token("revoked")),
    );
    let view = settings::status(&ctx, OutputFormat::Json).await;
    let View::Page { body, .. } = view else {
        panic!("expected page");
    };
    let value: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["authenticated"], false);
    assert!(value["user"].is_null());
}
