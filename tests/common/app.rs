//! Test application factory for integration tests.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use resumeforge::assets::AssetLoader;
use resumeforge::error::RenderError;
use resumeforge::server::{build_router, create_app_state_with_engine, AppState};
use resumeforge::services::{InMemoryStore, PdfEngine};

/// PDF engine that never starts a browser.
///
/// Returns a tiny fixed PDF and keeps the markup it was asked to print.
#[derive(Default)]
pub struct StubEngine {
    pub calls: AtomicUsize,
    pub last_html: Mutex<Option<String>>,
    pub fail: bool,
}

impl StubEngine {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_html(&self) -> Option<String> {
        self.last_html.lock().unwrap().clone()
    }
}

#[async_trait]
impl PdfEngine for StubEngine {
    async fn print_pdf(&self, html: &str, workdir: &Path) -> Result<Vec<u8>, RenderError> {
        assert!(workdir.is_dir(), "engine must get an existing scratch dir");
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_html.lock().unwrap() = Some(html.to_string());

        if self.fail {
            return Err(RenderError::BrowserFailed {
                status: "exit status: 1".to_string(),
                stderr: "stub failure".to_string(),
            });
        }
        Ok(b"%PDF-1.4\n% stub\n%%EOF\n".to_vec())
    }

    fn name(&self) -> &str {
        "stub"
    }
}

/// Test application with router and direct access to services
pub struct TestApp {
    router: axum::Router,
    pub store: Arc<InMemoryStore>,
    pub engine: Arc<StubEngine>,
}

impl TestApp {
    /// Create a new test application using embedded assets and a stub engine
    pub fn new() -> Self {
        Self::with_engine(StubEngine::default())
    }

    pub fn with_engine(engine: StubEngine) -> Self {
        let engine = Arc::new(engine);
        let state = Self::create_state_with(Arc::clone(&engine));
        let store = Arc::clone(&state.store);

        // Same router as production
        let router = build_router(state);

        Self {
            router,
            store,
            engine,
        }
    }

    /// Create state for custom router configuration
    pub fn create_state() -> AppState {
        Self::create_state_with(Arc::new(StubEngine::default()))
    }

    fn create_state_with(engine: Arc<StubEngine>) -> AppState {
        let asset_loader = Arc::new(AssetLoader::new(None, None));
        create_app_state_with_engine(asset_loader, engine).expect("Failed to create app state")
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> TestResponse {
        self.send_json("POST", path, body.to_string()).await
    }

    /// Make a POST request with a raw body
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        self.send_json("POST", path, body.to_string()).await
    }

    /// Make a PATCH request with JSON body
    pub async fn patch_json(&self, path: &str, body: &serde_json::Value) -> TestResponse {
        self.send_json("PATCH", path, body.to_string()).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request(Request::delete(path).body(Body::empty()).unwrap())
            .await
    }

    async fn send_json(&self, method: &str, path: &str, body: String) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .unwrap();
        self.request(request).await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Create a résumé and return its JSON record
    pub async fn create_resume(&self, body: serde_json::Value) -> serde_json::Value {
        let response = self.post_json("/api/resumes", &body).await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "create failed: {}",
            response.text()
        );
        response.json()
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Get raw body bytes
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Header value as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Check if response is a PDF document
    pub fn is_pdf(&self) -> bool {
        self.body.starts_with(b"%PDF-")
    }
}
