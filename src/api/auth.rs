//! API key authentication
//!
//! Middleware that admits requests carrying a configured `X-Api-Key`.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, info};

use super::AppState;
use crate::models::ErrorResponse;

pub const API_KEY_HEADER: &str = "X-Api-Key";

/// The authenticated caller, attached to the request for handlers.
#[derive(Debug, Clone)]
pub struct ApiClient {
    pub name: String,
}

fn unauthorized(reason: &str) -> Response {
    debug!("Rejected request: {}", reason);
    (StatusCode::UNAUTHORIZED, Json(ErrorResponse::new(reason))).into_response()
}

pub async fn require_api_key(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let provided = match request.headers().get(API_KEY_HEADER) {
        Some(value) => value.to_str().unwrap_or_default().trim(),
        None => return unauthorized("API Key header not found"),
    };

    if provided.is_empty() {
        return unauthorized("API Key is empty");
    }

    let client_name = match state.api_keys.iter().find(|entry| entry.key == provided) {
        Some(entry) => entry.client_name.clone(),
        None => return unauthorized("Invalid API Key"),
    };

    info!("API Key authentication successful for client: {}", client_name);
    request
        .extensions_mut()
        .insert(ApiClient { name: client_name });

    next.run(request).await
}
