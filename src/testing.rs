//! In-process stand-in for the generative API, used by the test suites.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use axum::{
    body::{to_bytes, Bytes},
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::config::RelayConfig;

#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub key: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

struct Inner {
    status: StatusCode,
    reply: String,
    calls: AtomicUsize,
    last: Mutex<Option<SeenRequest>>,
}

pub struct FakeUpstream {
    base: String,
    inner: Arc<Inner>,
}

impl FakeUpstream {
    /// Replies 200 with one candidate whose text part is `text`.
    pub async fn replying_text(text: &str) -> Self {
        Self::replying(json!({
            "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
        }))
        .await
    }

    pub async fn replying(body: Value) -> Self {
        Self::start(StatusCode::OK, body.to_string()).await
    }

    /// Replies 200 with `body` verbatim, JSON or not.
    pub async fn replying_raw(body: &str) -> Self {
        Self::start(StatusCode::OK, body.to_string()).await
    }

    pub async fn failing(status: u16, body: &str) -> Self {
        let status = StatusCode::from_u16(status).expect("valid status");
        Self::start(status, json!({ "error": { "message": body } }).to_string()).await
    }

    async fn start(status: StatusCode, reply: String) -> Self {
        let inner = Arc::new(Inner {
            status,
            reply,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        });
        let app = Router::new().fallback(record).with_state(inner.clone());
        let base = serve(app).await;
        Self { base, inner }
    }

    pub fn config(&self, key: Option<&str>) -> RelayConfig {
        RelayConfig::new(
            key.map(str::to_string),
            format!("{}/v1beta", self.base),
            "gemini-test",
            "127.0.0.1:0",
        )
    }

    pub fn calls(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<SeenRequest> {
        self.inner.last.lock().expect("poisoned").clone()
    }
}

async fn record(
    State(inner): State<Arc<Inner>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    inner.calls.fetch_add(1, Ordering::SeqCst);
    let seen = SeenRequest {
        key: query.get("key").cloned(),
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    };
    *inner.last.lock().expect("poisoned") = Some(seen);

    (
        inner.status,
        [(header::CONTENT_TYPE, "application/json")],
        inner.reply.clone(),
    )
        .into_response()
}

/// Binds `app` on an ephemeral localhost port and returns its base URL.
pub async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

pub async fn read_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body = serde_json::from_slice(&bytes).expect("json body");
    (status, body)
}
