//! HTTP API
//!
//! Thin read-only layer over the league manager. Scrape failures never
//! surface as HTTP errors: every endpoint answers 200 with the latest
//! good data (or an empty list) plus a staleness flag, so consumers can
//! tell "fresh empty" apart from "old data after a failed refresh".

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::module::league::types::{MatchRecord, RankingEntry, find_next_match};
use crate::module::league::LeagueManager;

#[derive(Serialize)]
struct CalendarResponse {
    updated: Option<DateTime<Utc>>,
    stale: bool,
    calendar: Vec<MatchRecord>,
}

#[derive(Serialize)]
struct RankingResponse {
    updated: Option<DateTime<Utc>>,
    stale: bool,
    ranking: Vec<RankingEntry>,
}

#[derive(Serialize)]
struct NextMatchResponse {
    updated: Option<DateTime<Utc>>,
    stale: bool,
    next_match: Option<MatchRecord>,
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Stats endpoint - returns basic server information
async fn stats() -> impl IntoResponse {
    let stats = serde_json::json!({
        "status": "running",
        "service": "rolska-mirror",
        "version": env!("CARGO_PKG_VERSION"),
    });
    (StatusCode::OK, serde_json::to_string(&stats).unwrap())
}

async fn get_calendar(State(manager): State<Arc<LeagueManager>>) -> Json<CalendarResponse> {
    let view = manager.calendar().await;
    Json(CalendarResponse {
        updated: view.updated_at(),
        stale: view.stale,
        calendar: view.snapshot.map(|s| s.records).unwrap_or_default(),
    })
}

async fn get_ranking(State(manager): State<Arc<LeagueManager>>) -> Json<RankingResponse> {
    let view = manager.ranking().await;
    Json(RankingResponse {
        updated: view.updated_at(),
        stale: view.stale,
        ranking: view.snapshot.map(|s| s.records).unwrap_or_default(),
    })
}

async fn get_next_match(State(manager): State<Arc<LeagueManager>>) -> Json<NextMatchResponse> {
    let view = manager.calendar().await;
    let next_match = view
        .snapshot
        .as_ref()
        .and_then(|s| find_next_match(&s.records))
        .cloned();
    Json(NextMatchResponse {
        updated: view.updated_at(),
        stale: view.stale,
        next_match,
    })
}

/// Build the application router.
pub fn build_router(manager: Arc<LeagueManager>, enable_cors: bool) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .route("/stats", get(stats))
        .route("/api/calendar", get(get_calendar))
        .route("/api/ranking", get(get_ranking))
        .route("/api/next-match", get(get_next_match))
        .with_state(manager)
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        router
    }
}
