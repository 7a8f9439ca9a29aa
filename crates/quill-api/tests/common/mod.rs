//! Shared harness: an in-memory database behind the real router.

#![allow(dead_code)]

use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use quill_api::{create_router, AppState};
use quill_db::test_fixtures::{TestDatabase, SEED_SPACING};
use quill_db::Database;
use serde_json::Value;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub db: Database,
}

impl TestApp {
    pub async fn new() -> Self {
        let test_db = TestDatabase::new().await;
        let router = create_router(AppState::new(test_db.db.clone()));
        Self {
            router,
            db: test_db.db,
        }
    }

    /// Send a request with an optional raw body and decode the JSON reply.
    pub async fn send(&self, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        let request = builder
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .expect("build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response body is JSON")
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(&body.to_string())).await
    }

    pub async fn put(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(&body.to_string())).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None).await
    }

    /// Create a note through the API and return its id.
    ///
    /// Waits briefly first so consecutive notes get distinct timestamps.
    pub async fn create_note(&self, title: &str, content: &str, tags: Option<&str>) -> i64 {
        tokio::time::sleep(SEED_SPACING).await;
        let mut body = serde_json::json!({ "title": title, "content": content });
        if let Some(tags) = tags {
            body["tags"] = Value::from(tags);
        }
        let (status, json) = self.post("/api/notes", &body).await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {}", json);
        json["data"]["id"].as_i64().expect("note id")
    }
}

pub fn titles(json: &Value) -> Vec<String> {
    json["data"]
        .as_array()
        .expect("data array")
        .iter()
        .map(|n| n["title"].as_str().unwrap_or_default().to_string())
        .collect()
}

pub async fn pause() {
    tokio::time::sleep(Duration::from_millis(5)).await;
}
