//! Fake course API for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves:
//! - `GET /api/students` — the configured payload with the configured status
//! - `GET /media/{file}` — 200 for registered images, 404 otherwise
//!
//! # Example
//!
//! ```rust,no_run
//! let remote = FakeRemote::start().await.unwrap();
//! remote.respond(200, PAYLOAD_ARRAY).await;
//! remote.add_image("ada.jpg").await;
//!
//! let loader = Loader::new(None, Some(remote.students_url())).unwrap();
//! ```

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// State shared between the router and test code.
struct RemoteState {
    status: u16,
    body: String,
    images: HashSet<String>,
    /// Requests served by `/api/students`.
    hits: usize,
}

impl Default for RemoteState {
    fn default() -> Self {
        Self {
            status: 200,
            body: "[]".to_string(),
            images: HashSet::new(),
            hits: 0,
        }
    }
}

/// Handle to the running fake course API.
pub struct FakeRemote {
    addr: SocketAddr,
    state: Arc<Mutex<RemoteState>>,
}

impl FakeRemote {
    /// Start the server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(RemoteState::default()));

        let app = Router::new()
            .route("/api/students", get(students))
            .route("/media/{file}", get(media))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Base URL (e.g. `http://127.0.0.1:PORT`).
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn students_url(&self) -> String {
        format!("{}/api/students", self.base_url())
    }

    /// Set the status and body returned by `/api/students`.
    pub async fn respond(&self, status: u16, body: &str) {
        let mut state = self.state.lock().await;
        state.status = status;
        state.body = body.to_string();
    }

    /// Make `/media/{file}` answer 200.
    pub async fn add_image(&self, file: &str) {
        self.state.lock().await.images.insert(file.to_string());
    }

    pub async fn hits(&self) -> usize {
        self.state.lock().await.hits
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

async fn students(State(state): State<Arc<Mutex<RemoteState>>>) -> impl IntoResponse {
    let mut state = state.lock().await;
    state.hits += 1;
    let status = StatusCode::from_u16(state.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
}

async fn media(
    Path(file): Path<String>,
    State(state): State<Arc<Mutex<RemoteState>>>,
) -> impl IntoResponse {
    if state.lock().await.images.contains(&file) {
        (StatusCode::OK, [(header::CONTENT_TYPE, "image/jpeg")], vec![0xFF, 0xD8, 0xFF])
    } else {
        (StatusCode::NOT_FOUND, [(header::CONTENT_TYPE, "text/plain")], Vec::new())
    }
}
