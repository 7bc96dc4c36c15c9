//! Gitea webhook - verify and decode inbound Gitea webhook deliveries.
//!
//! This library authenticates a delivery with the hook's shared secret, checks
//! that its event type is one the caller accepts, and decodes the body into a
//! typed [`Payload`]. The `gitea-webhook-web` binary serves it over HTTP.
//!
//! ## Flow
//!
//! ```text
//! Request → method/header checks → accepted event? → HMAC-SHA256 → Payload
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod payload;
pub mod web;
pub mod webhook;

// Re-export commonly used types
pub use config::Config;
pub use error::{ConfigError, WebhookError};
pub use events::HookEventType;
pub use payload::{Payload, PayloadKind};
pub use webhook::{decode, options, signature, Webhook, WebhookBuilder, WebhookOption};
