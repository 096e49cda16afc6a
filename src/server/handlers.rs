//! HTTP route handlers
//!
//! This module provides HTTP route handler functions.

use crate::build_info;
use crate::server::state::AppState;
use crate::utils::current_timestamp;
use actix_web::{HttpResponse, web};
use serde_json::json;

/// Health check endpoint handler
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let uptime = (chrono::Utc::now() - state.started_at).num_seconds().max(0);
    let build = build_info();

    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "timestamp": current_timestamp(),
        "version": build.version,
        "commit": build.git_hash,
        "storage": state.store.backend_name(),
        "uptime_seconds": uptime
    }))
}
