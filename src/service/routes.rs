//! Router configuration for the frontier service

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use crate::frontier::FrontierStore;

/// Create the router exposing every store operation under `/api`
pub fn create_router(store: Arc<FrontierStore>) -> Router {
    Router::new()
        .route("/api/ping", get(handlers::ping))
        // Queues
        .route("/api/frontier/push", post(handlers::push_unsearched))
        .route("/api/frontier/pop", get(handlers::pop_unsearched))
        .route("/api/pages/push", post(handlers::push_unextracted))
        .route("/api/pages/pop", get(handlers::pop_unextracted))
        // Dedup and discoveries
        .route("/api/seen", post(handlers::add_to_seen))
        .route(
            "/api/discoveries",
            get(handlers::list_discoveries).post(handlers::record_discovery),
        )
        .route(
            "/api/finished",
            get(handlers::finished_count).post(handlers::increment_finished),
        )
        // Lifecycle and scope
        .route(
            "/api/shutdown",
            get(handlers::is_shutdown).post(handlers::signal_shutdown),
        )
        .route(
            "/api/root-domain",
            get(handlers::root_domain).post(handlers::set_root_domain),
        )
        .route("/api/scope", post(handlers::check_scope))
        .route("/api/stats", get(handlers::stats))
        .with_state(store)
}
