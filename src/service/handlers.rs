//! HTTP handlers mapping one-to-one onto frontier store operations

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use crate::frontier::FrontierStore;
use crate::page::FetchedPage;

type Store = State<Arc<FrontierStore>>;

/// Longest a remote pop may block
const MAX_POP_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_POP_TIMEOUT_MS: u64 = 1_000;

#[derive(Debug, Deserialize)]
pub struct UrlBody {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct DiscoveryBody {
    pub url: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct PopParams {
    pub timeout_ms: Option<u64>,
}

impl PopParams {
    fn timeout(&self) -> Duration {
        Duration::from_millis(
            self.timeout_ms
                .unwrap_or(DEFAULT_POP_TIMEOUT_MS)
                .min(MAX_POP_TIMEOUT_MS),
        )
    }
}

fn bad_request(message: impl std::fmt::Display) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": message.to_string() })),
    )
        .into_response()
}

pub async fn ping(State(store): Store) -> impl IntoResponse {
    Json(json!({ "pong": store.ping() }))
}

pub async fn push_unsearched(State(store): Store, Json(body): Json<UrlBody>) -> Response {
    match store.canonicalize(&body.url) {
        Ok(url) => Json(json!({ "accepted": store.push_unsearched(url) })).into_response(),
        Err(e) => bad_request(e),
    }
}

pub async fn pop_unsearched(State(store): Store, Query(params): Query<PopParams>) -> impl IntoResponse {
    let url = store
        .pop_unsearched(params.timeout())
        .await
        .map(|u| u.into_string());
    Json(json!({ "url": url }))
}

pub async fn push_unextracted(State(store): Store, Json(page): Json<FetchedPage>) -> impl IntoResponse {
    Json(json!({ "accepted": store.push_unextracted(page) }))
}

pub async fn pop_unextracted(State(store): Store, Query(params): Query<PopParams>) -> impl IntoResponse {
    let page = store.pop_unextracted(params.timeout()).await;
    Json(json!({ "page": page }))
}

pub async fn add_to_seen(State(store): Store, Json(body): Json<UrlBody>) -> Response {
    match store.canonicalize(&body.url) {
        Ok(url) => Json(json!({ "claimed": store.add_to_seen(&url) })).into_response(),
        Err(e) => bad_request(e),
    }
}

pub async fn record_discovery(State(store): Store, Json(body): Json<DiscoveryBody>) -> Response {
    match store.canonicalize(&body.url) {
        Ok(url) => Json(json!({
            "recorded": store.record_discovery(&url, &body.description)
        }))
        .into_response(),
        Err(e) => bad_request(e),
    }
}

pub async fn list_discoveries(State(store): Store) -> impl IntoResponse {
    let discoveries: Vec<_> = store
        .discoveries()
        .into_iter()
        .map(|(url, description)| json!({ "url": url, "description": description }))
        .collect();
    Json(discoveries)
}

pub async fn increment_finished(State(store): Store) -> impl IntoResponse {
    Json(json!({ "finished": store.increment_finished() }))
}

pub async fn finished_count(State(store): Store) -> impl IntoResponse {
    Json(json!({ "finished": store.finished_count() }))
}

pub async fn signal_shutdown(State(store): Store) -> impl IntoResponse {
    tracing::info!("Shutdown requested through the frontier service");
    store.signal_shutdown();
    Json(json!({ "shutdown": true }))
}

pub async fn is_shutdown(State(store): Store) -> impl IntoResponse {
    Json(json!({ "shutdown": store.is_shutdown() }))
}

pub async fn set_root_domain(State(store): Store, Json(body): Json<UrlBody>) -> Response {
    match store.set_root_domain(&body.url) {
        Ok(domain) => Json(json!({ "root_domain": domain })).into_response(),
        Err(e) => bad_request(e),
    }
}

pub async fn root_domain(State(store): Store) -> impl IntoResponse {
    Json(json!({ "root_domain": store.root_domain() }))
}

pub async fn check_scope(State(store): Store, Json(body): Json<UrlBody>) -> impl IntoResponse {
    Json(json!({
        "in_scope": store.in_scope(&body.url),
        "blacklisted": store.is_blacklisted(&body.url),
    }))
}

pub async fn stats(State(store): Store) -> impl IntoResponse {
    Json(store.snapshot())
}
