//! Shared helpers: an in-process app backed by the in-memory store, and HS256 token minting.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use http_body_util::BodyExt;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use expense_api::app::build_router;
use expense_api::config::Config;
use expense_api::repos::MemoryExpenseRepo;
use expense_api::services::{auth::AuthService, id_codec::IdCodec};
use expense_api::state::AppState;

pub const SECRET: &str = "integration-test-secret";

pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(&[])
    }

    /// Like `new`, with extra configuration keys on top of `JWT_SECRET`.
    pub fn with_config(extra: &[(&str, &str)]) -> Self {
        let config = Config::from_lookup(|key| match key {
            "JWT_SECRET" => Some(SECRET.to_string()),
            _ => extra
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string()),
        })
        .unwrap();

        let state = AppState::new(
            Arc::new(MemoryExpenseRepo::new()),
            IdCodec::new(config.sqids_min_length, &config.sqids_alphabet).unwrap(),
            Arc::new(AuthService::new(config.jwt_secret.as_bytes(), None, None, 0)),
        );

        Self {
            router: build_router(state, &config),
        }
    }

    pub async fn send(&self, req: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(req).await.unwrap()
    }

    pub async fn create(&self, token: &str, body: Value) -> (StatusCode, Value) {
        let res = self
            .send(request("POST", "/api/v1/expenses", Some(token), Some(body)))
            .await;
        read(res).await
    }

    pub async fn list(&self, token: &str) -> (StatusCode, Value) {
        let res = self
            .send(request("GET", "/api/v1/expenses", Some(token), None))
            .await;
        read(res).await
    }

    pub async fn update(&self, token: &str, id: &str, body: Value) -> (StatusCode, Value) {
        let uri = format!("/api/v1/expenses/{id}");
        let res = self.send(request("PUT", &uri, Some(token), Some(body))).await;
        read(res).await
    }

    pub async fn delete(&self, token: &str, id: &str) -> (StatusCode, Value) {
        let uri = format!("/api/v1/expenses/{id}");
        let res = self.send(request("DELETE", &uri, Some(token), None)).await;
        read(res).await
    }
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn read(res: Response<Body>) -> (StatusCode, Value) {
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub fn now() -> u64 {
    chrono::Utc::now().timestamp() as u64
}

pub fn sign(claims: Value, secret: &str) -> String {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

/// A valid token for `user`, expiring in ten minutes.
pub fn token_for(user: Uuid) -> String {
    sign(json!({ "sub": user.to_string(), "exp": now() + 600 }), SECRET)
}

pub fn lunch() -> Value {
    json!({
        "date": "2024-01-01",
        "amount": 42.5,
        "category": "food",
        "description": "lunch"
    })
}
