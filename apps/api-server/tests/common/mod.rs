#![allow(dead_code, unused_macros)]

use actix_web::test::TestRequest;
use serde_json::{Value, json};

use api_server::config::AppConfig;
use api_server::state::AppState;
use thinkspeak_core::domain::NewUser;

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";

pub async fn state() -> AppState {
    state_with(AppConfig::default()).await
}

pub async fn state_with(config: AppConfig) -> AppState {
    AppState::new(&config).await.expect("state builds")
}

/// Adds a non-admin account to the store.
pub async fn add_reader(state: &AppState, username: &str, password: &str) {
    state
        .store
        .create_user(NewUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: state.passwords.hash(password).expect("hash"),
            is_admin: false,
        })
        .await
        .expect("reader created");
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

pub fn login_request(username: &str, password: &str) -> TestRequest {
    TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": username, "password": password }))
}

pub fn post_body(title: &str, status: &str) -> Value {
    json!({ "title": title, "content": "Body text", "status": status })
}

pub fn comment_body(post_id: i64) -> Value {
    json!({
        "postId": post_id,
        "name": "Reader",
        "email": "reader@example.com",
        "content": "Nice post"
    })
}

/// Log in and return the session token.
macro_rules! login {
    ($app:expr) => {
        login!($app, common::ADMIN_USER, common::ADMIN_PASSWORD)
    };
    ($app:expr, $username:expr, $password:expr) => {{
        let body: serde_json::Value = actix_web::test::call_and_read_body_json(
            $app,
            common::login_request($username, $password).to_request(),
        )
        .await;
        body["sessionId"].as_str().expect("sessionId").to_string()
    }};
}

/// Create a post as admin and return its JSON.
macro_rules! create_post {
    ($app:expr, $token:expr, $body:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri("/api/admin/posts")
            .insert_header(common::bearer($token))
            .set_json($body)
            .to_request();
        let resp = actix_web::test::call_service($app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);
        let post: serde_json::Value = actix_web::test::read_body_json(resp).await;
        post
    }};
}

/// GET a path, optionally authenticated, and return status plus JSON body.
macro_rules! get_json {
    ($app:expr, $uri:expr) => {{
        let req = actix_web::test::TestRequest::get().uri($uri).to_request();
        let resp = actix_web::test::call_service($app, req).await;
        let status = resp.status();
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        (status, body)
    }};
    ($app:expr, $uri:expr, $token:expr) => {{
        let req = actix_web::test::TestRequest::get()
            .uri($uri)
            .insert_header(common::bearer($token))
            .to_request();
        let resp = actix_web::test::call_service($app, req).await;
        let status = resp.status();
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        (status, body)
    }};
}
