//! Web server module for receiving Gitea webhooks.
//!
//! This module exposes [`Webhook::parse`](crate::Webhook::parse) over axum:
//! - Verifies the delivery (method, headers, signature)
//! - Decodes the payload into its typed shape
//! - Reports the outcome as JSON with a matching status code

pub mod handlers;

pub use handlers::{gitea_webhook, health, AppState, HealthResponse, WebhookResponse};
