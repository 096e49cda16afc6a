//! Action entry points
//!
//! `GET {endpoint}?action=..&data=..` and `POST {endpoint}` with a JSON body
//! holding `action` next to the payload fields. Both answer 200 with the
//! response envelope, failures included.

use crate::core::action::{self, DEFAULT_ACTION, Payload};
use crate::server::state::AppState;
use crate::utils::error::{Result, TrackerError};
use actix_web::{HttpRequest, HttpResponse, web};
use futures::StreamExt;
use serde::Deserialize;
use tracing::debug;

/// Configure the action routes under `endpoint`
pub fn configure_routes(cfg: &mut web::ServiceConfig, endpoint: &str) {
    cfg.service(
        web::resource(endpoint)
            .route(web::get().to(handle_get))
            .route(web::post().to(handle_post)),
    );
}

/// Query parameters of the GET entry point
#[derive(Debug, Default, Deserialize)]
pub struct ActionQuery {
    pub action: Option<String>,
    pub data: Option<String>,
}

/// GET entry point; a missing action means `getAll`
pub async fn handle_get(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
    let query = web::Query::<ActionQuery>::from_query(req.query_string())
        .map_err(|e| TrackerError::bad_request(format!("Invalid query string: {}", e)))?
        .into_inner();

    let name = query
        .action
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ACTION.to_string());
    let payload = Payload::from_query(query.data.as_deref())?;

    respond(&state, &name, payload).await
}

/// POST entry point; the body is read as JSON whatever the content type
pub async fn handle_post(payload: web::Payload, state: web::Data<AppState>) -> Result<HttpResponse> {
    let limit = state.config.server().max_body_size;
    let body = read_body(payload, limit).await?;

    let (name, payload) = action::parse_post_body(&body)?;
    respond(&state, &name, payload).await
}

async fn respond(state: &AppState, name: &str, payload: Payload) -> Result<HttpResponse> {
    debug!("Handling action {}", name);
    let envelope = action::dispatch(&state.store, name, payload).await?;
    Ok(HttpResponse::Ok().json(envelope))
}

/// Collect the request body, refusing anything above `limit` bytes
async fn read_body(mut payload: web::Payload, limit: usize) -> Result<web::BytesMut> {
    let mut body = web::BytesMut::new();

    while let Some(chunk) = payload.next().await {
        let chunk = chunk
            .map_err(|e| TrackerError::bad_request(format!("Failed to read request body: {}", e)))?;

        if body.len() + chunk.len() > limit {
            return Err(TrackerError::bad_request(format!(
                "Request body exceeds {} bytes",
                limit
            )));
        }
        body.extend_from_slice(&chunk);
    }

    Ok(body)
}
