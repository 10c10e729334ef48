//! REST endpoints for the inbox snapshot.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::config::UserRole;
use crate::ingest::refresher::{RefreshOutcome, Refresher};
use crate::state::InboxState;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub inbox: Arc<InboxState>,
    pub refresher: Arc<Refresher>,
    /// Injected at startup; there is no runtime role toggle.
    pub role: UserRole,
}

/// Build the Axum router with inbox REST routes.
///
/// Responses are CORS-permissive: the browser frontend is served from a
/// different origin.
pub fn inbox_routes(inbox: Arc<InboxState>, refresher: Arc<Refresher>, role: UserRole) -> Router {
    let state = AppState {
        inbox,
        refresher,
        role,
    };

    Router::new()
        .route("/health", get(health))
        .route("/api/emails", get(list_emails))
        .route("/api/emails/counts", get(category_counts))
        .route("/api/emails/refresh", post(trigger_refresh))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ── Health ──────────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "zenbox"
    }))
}

// ── Inbox endpoints ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ListParams {
    /// Category filter; `inbox` or absent selects everything.
    category: Option<String>,
}

async fn list_emails(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    let snapshot = state.inbox.snapshot().await;
    let emails = snapshot.filtered(params.category.as_deref());
    let total = emails.len();
    let unread = emails.iter().filter(|e| !e.is_read).count();

    Json(serde_json::json!({
        "emails": emails,
        "total": total,
        "unread": unread,
        "cycle": snapshot.cycle,
        "refreshed_at": snapshot.refreshed_at,
        "role": state.role,
    }))
}

async fn category_counts(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.inbox.snapshot().await;
    Json(snapshot.counts())
}

async fn trigger_refresh(State(state): State<AppState>) -> impl IntoResponse {
    match state.refresher.refresh_now().await {
        RefreshOutcome::Completed { total } => {
            info!(total, "Manual refresh completed");
            (
                StatusCode::OK,
                Json(serde_json::json!({"status": "refreshed", "total": total})),
            )
        }
        RefreshOutcome::AlreadyRunning => (
            StatusCode::CONFLICT,
            Json(serde_json::json!({"error": "Refresh already in flight"})),
        ),
    }
}
