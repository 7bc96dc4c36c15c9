//! Webhook endpoint handlers.

use std::io::Cursor;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, Request, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::signature::EVENT_HEADER;
use crate::{Config, Webhook, WebhookError};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub webhook: Webhook,
}

impl AppState {
    pub fn new(config: Config, webhook: Webhook) -> Self {
        Self {
            config: Arc::new(config),
            webhook,
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Gitea Webhook
// =============================================================================

/// Webhook response.
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Gitea webhook endpoint.
///
/// Mounted for every method so that non-POST deliveries get a 405 from the
/// verifier rather than from the router.
pub async fn gitea_webhook(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let event = headers
        .get(EVENT_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    info!(
        method = %method,
        event = ?event,
        body_length = body.len(),
        "gitea_webhook_received"
    );

    let mut request = Request::new(Cursor::new(body));
    *request.method_mut() = method;
    *request.headers_mut() = headers;

    match state.webhook.parse(request, &state.config.events) {
        Ok(payload) => {
            info!(
                event = ?event,
                kind = payload.kind().as_str(),
                repository = ?payload.repository().map(|r| r.full_name.as_str()),
                sender = ?payload.sender().map(|u| u.login.as_str()),
                "gitea_webhook_accepted"
            );

            (
                StatusCode::OK,
                Json(WebhookResponse {
                    status: "accepted",
                    event,
                    error: None,
                }),
            )
        }
        Err(e) => {
            let (code, status) = rejection(&e);
            match &e {
                WebhookError::EventNotAccepted(_) => {
                    info!(event = ?event, "gitea_webhook_ignored")
                }
                _ => warn!(event = ?event, error = %e, "gitea_webhook_rejected"),
            }

            (
                code,
                Json(WebhookResponse {
                    status,
                    event,
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}

/// Map a verification failure to the response status.
fn rejection(err: &WebhookError) -> (StatusCode, &'static str) {
    match err {
        WebhookError::NoEventsSpecified => (StatusCode::INTERNAL_SERVER_ERROR, "error"),
        WebhookError::InvalidMethod(_) => (StatusCode::METHOD_NOT_ALLOWED, "invalid_method"),
        WebhookError::MissingEventHeader => (StatusCode::BAD_REQUEST, "missing_event"),
        WebhookError::EventNotAccepted(_) => (StatusCode::ACCEPTED, "ignored"),
        WebhookError::PayloadRead(_) => (StatusCode::BAD_REQUEST, "invalid_payload"),
        WebhookError::MissingSignatureHeader | WebhookError::SignatureMismatch => {
            (StatusCode::UNAUTHORIZED, "unauthorized")
        }
        WebhookError::UnknownEvent(_) | WebhookError::PayloadParse(_) => {
            (StatusCode::UNPROCESSABLE_ENTITY, "invalid_payload")
        }
    }
}
