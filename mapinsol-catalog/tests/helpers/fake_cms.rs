//! In-process stand-in for the WordPress REST API
//!
//! Serves a fixed set of practices, terms and media on an ephemeral port,
//! counting every request it receives.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use super::fixtures;

/// Behavior switches for the fake CMS
#[derive(Debug, Clone, Copy)]
pub struct FakeOptions {
    /// Every route answers 500
    pub fail: bool,
    /// The first N requests answer 503, later ones succeed
    pub fail_first: usize,
    /// Largest page served regardless of `per_page`
    pub page_cap: usize,
    /// Synthetic practices appended after the fixtures
    pub extra_practices: usize,
    /// Pause before answering a practice listing
    pub delay: Duration,
}

impl Default for FakeOptions {
    fn default() -> Self {
        Self {
            fail: false,
            fail_first: 0,
            page_cap: 100,
            extra_practices: 0,
            delay: Duration::ZERO,
        }
    }
}

struct FakeState {
    options: FakeOptions,
    hits: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

/// Tracks one practice listing request while it is being answered
struct InFlight<'a>(&'a FakeState);

impl<'a> InFlight<'a> {
    fn enter(state: &'a FakeState) -> Self {
        let now = state.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        state.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        Self(state)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Handle to a running fake CMS
pub struct FakeCms {
    pub base_url: String,
    state: Arc<FakeState>,
}

impl FakeCms {
    /// Requests served so far
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    /// Most practice listings ever answered at the same time
    pub fn peak_in_flight(&self) -> usize {
        self.state.peak_in_flight.load(Ordering::SeqCst)
    }
}

pub async fn spawn_fake_cms() -> FakeCms {
    spawn_fake_cms_with(FakeOptions::default()).await
}

pub async fn spawn_failing_cms() -> FakeCms {
    spawn_fake_cms_with(FakeOptions {
        fail: true,
        ..Default::default()
    })
    .await
}

pub async fn spawn_fake_cms_with(options: FakeOptions) -> FakeCms {
    let state = Arc::new(FakeState {
        options,
        hits: AtomicUsize::new(0),
        in_flight: AtomicUsize::new(0),
        peak_in_flight: AtomicUsize::new(0),
    });

    let wp = Router::new()
        .route("/buenas_practicas_ast", get(practices))
        .route("/category-practices", get(categories))
        .route("/tags-practices", get(tags))
        .route("/media", get(media_list))
        .route("/media/:id", get(media_item))
        .with_state(state.clone());

    let app = Router::new().nest("/wp-json/wp/v2", wp);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake CMS");
    let addr = listener.local_addr().expect("fake CMS address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake CMS server");
    });

    FakeCms {
        base_url: base_url(addr),
        state,
    }
}

/// A base URL nothing listens on
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind placeholder");
    let addr = listener.local_addr().expect("placeholder address");
    drop(listener);
    base_url(addr)
}

fn base_url(addr: SocketAddr) -> String {
    format!("http://{}/wp-json/wp/v2", addr)
}

fn record_hit(state: &FakeState) -> Option<Response> {
    let before = state.hits.fetch_add(1, Ordering::SeqCst);
    if state.options.fail {
        return Some((StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response());
    }
    if before < state.options.fail_first {
        return Some((StatusCode::SERVICE_UNAVAILABLE, "warming up").into_response());
    }
    None
}

fn extra_practice(index: usize) -> Value {
    json!({
        "id": 1000 + index,
        "slug": format!("extra-{}", index),
        "status": "publish",
        "title": { "rendered": format!("Práctica {}", index) },
        "meta": []
    })
}

fn param_usize(params: &HashMap<String, String>, key: &str, default: usize) -> usize {
    params
        .get(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

async fn practices(
    State(state): State<Arc<FakeState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Some(failure) = record_hit(&state) {
        return failure;
    }

    let _in_flight = InFlight::enter(&state);
    if !state.options.delay.is_zero() {
        tokio::time::sleep(state.options.delay).await;
    }

    let mut rows = fixtures::practices();
    rows.extend((0..state.options.extra_practices).map(extra_practice));

    if let Some(slug) = params.get("slug") {
        rows.retain(|p| p["slug"] == slug.as_str());
    }

    let total = rows.len();
    let per_page = param_usize(&params, "per_page", 10).clamp(1, state.options.page_cap);
    let page = param_usize(&params, "page", 1).max(1);
    let total_pages = total.div_ceil(per_page);

    let page_rows: Vec<Value> = rows.into_iter().skip((page - 1) * per_page).take(per_page).collect();

    let body: Vec<Value> = if params.get("_fields").map(String::as_str) == Some("slug") {
        page_rows.iter().map(|p| json!({ "slug": p["slug"] })).collect()
    } else {
        page_rows
    };

    let mut headers = HeaderMap::new();
    headers.insert("x-wp-total", HeaderValue::from(total as u64));
    headers.insert("x-wp-totalpages", HeaderValue::from(total_pages as u64));

    (headers, Json(body)).into_response()
}

async fn categories(State(state): State<Arc<FakeState>>) -> Response {
    if let Some(failure) = record_hit(&state) {
        return failure;
    }
    Json(fixtures::categories()).into_response()
}

async fn tags(State(state): State<Arc<FakeState>>) -> Response {
    if let Some(failure) = record_hit(&state) {
        return failure;
    }
    Json(fixtures::tags()).into_response()
}

/// Answers in reverse id order, as the real CMS may without `orderby=include`
async fn media_list(
    State(state): State<Arc<FakeState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Some(failure) = record_hit(&state) {
        return failure;
    }

    let include: Vec<u64> = params
        .get("include")
        .map(|ids| ids.split(',').filter_map(|id| id.parse().ok()).collect())
        .unwrap_or_default();

    let mut found: Vec<Value> = fixtures::media()
        .into_iter()
        .filter(|m| m["id"].as_u64().is_some_and(|id| include.contains(&id)))
        .collect();
    found.reverse();

    Json(found).into_response()
}

async fn media_item(State(state): State<Arc<FakeState>>, Path(id): Path<u64>) -> Response {
    if let Some(failure) = record_hit(&state) {
        return failure;
    }

    match fixtures::media().into_iter().find(|m| m["id"] == id) {
        Some(media) => Json(media).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "code": "rest_post_invalid_id", "message": "Invalid post ID." })),
        )
            .into_response(),
    }
}
