//! Test doubles for the upstream services
//!
//! Each double is a real axum server bound to an ephemeral local port. A
//! middleware records every request it receives so tests can assert on what
//! the publisher sent, and on what it did not send.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::{Body, Bytes, to_bytes},
    extract::State,
    http::{HeaderMap, Method, Request, StatusCode},
    middleware::{self, Next},
    response::Response,
};
use common::config::Settings;
use publisher::{AppState, create_router};
use serde_json::Value;
use tokio::net::TcpListener;
use tower::ServiceExt;

pub const USERNAME: &str = "editor";
pub const PASSWORD: &str = "secret";
/// `basic_auth(USERNAME, PASSWORD)`
pub const AUTHORIZATION: &str = "Basic ZWRpdG9yOnNlY3JldA==";
pub const PIXABAY_KEY: &str = "test-key";

/// A request received by an upstream double
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body is not JSON")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Decoded query parameters, in order
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let url = reqwest::Url::parse(&format!(
            "http://upstream{}?{}",
            self.path,
            self.query.as_deref().unwrap_or_default()
        ))
        .expect("invalid recorded url");

        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    pub fn query_param(&self, name: &str) -> Option<String> {
        self.query_pairs()
            .into_iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }
}

/// Requests received by an upstream double
#[derive(Debug, Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<RecordedRequest>>>);

impl Recorder {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.0.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().unwrap().is_empty()
    }
}

async fn record(State(recorder): State<Recorder>, req: Request<Body>, next: Next) -> Response {
    let (parts, body) = req.into_parts();
    let body = to_bytes(body, usize::MAX).await.unwrap_or_default();

    recorder.0.lock().unwrap().push(RecordedRequest {
        method: parts.method.clone(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(str::to_string),
        headers: parts.headers.clone(),
        body: body.clone(),
    });

    next.run(Request::from_parts(parts, Body::from(body))).await
}

/// Serve `router` on an ephemeral port and return its base URL
pub async fn spawn_upstream(router: Router) -> (String, Recorder) {
    let recorder = Recorder::default();
    let app = router
        .fallback(|| async { StatusCode::NOT_FOUND })
        .layer(middleware::from_fn_with_state(recorder.clone(), record));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", address), recorder)
}

/// Settings pointing every client at the given base URLs
pub fn settings(wordpress_url: &str, ollama_url: &str, pixabay_base: &str) -> Settings {
    Settings {
        port: 0,
        env: "test".to_string(),
        wordpress_url: wordpress_url.to_string(),
        wordpress_username: USERNAME.to_string(),
        wordpress_password: PASSWORD.to_string(),
        ollama_url: ollama_url.to_string(),
        ollama_model: "mistral".to_string(),
        pixabay_api_key: PIXABAY_KEY.to_string(),
        pixabay_url: format!("{}/api/", pixabay_base),
    }
}

pub fn app(settings: &Settings) -> Router {
    create_router(AppState::new(settings))
}

/// Drive the router with one request and decode the JSON answer
///
/// Empty bodies decode to `Value::Null`.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("response body is not JSON")
    };

    (status, headers, value)
}

pub fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}
