//! Error types for webhook verification and decoding.
//!
//! Every failure in the pipeline maps to exactly one [`WebhookError`] variant so
//! callers can pick an HTTP status (or ignore a delivery) by matching on it.

use std::io;
use std::path::PathBuf;

use http::Method;
use thiserror::Error;

/// Errors returned by [`Webhook::parse`](crate::Webhook::parse) and [`decode`](crate::decode).
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The caller passed an empty set of accepted events.
    #[error("no event specified to parse")]
    NoEventsSpecified,

    /// Gitea only delivers webhooks with POST.
    #[error("invalid HTTP method: {0}")]
    InvalidMethod(Method),

    /// `X-Gitea-Event` is absent or empty.
    #[error("missing X-Gitea-Event header")]
    MissingEventHeader,

    /// The delivered event is not one the caller asked for.
    #[error("event not accepted: {0}")]
    EventNotAccepted(String),

    /// The body could not be read, or was empty.
    #[error("error reading payload: {0}")]
    PayloadRead(#[source] io::Error),

    /// A secret is configured but `X-Gitea-Signature` is absent or empty.
    #[error("missing X-Gitea-Signature header")]
    MissingSignatureHeader,

    /// The signature does not match HMAC-SHA256(secret, body).
    #[error("HMAC verification failed")]
    SignatureMismatch,

    /// The event identifier has no payload shape.
    #[error("unknown event: {0}")]
    UnknownEvent(String),

    /// The body is not valid JSON for the event's payload shape.
    #[error("error parsing payload: {0}")]
    PayloadParse(#[from] serde_json::Error),
}

/// Errors raised while applying [`WebhookOption`](crate::WebhookOption)s.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The secret file could not be read.
    #[error("failed to read webhook secret from {path}: {source}")]
    SecretFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            WebhookError::MissingEventHeader.to_string(),
            "missing X-Gitea-Event header"
        );
        assert_eq!(
            WebhookError::InvalidMethod(Method::GET).to_string(),
            "invalid HTTP method: GET"
        );
        assert_eq!(
            WebhookError::EventNotAccepted("wiki".to_string()).to_string(),
            "event not accepted: wiki"
        );
    }

    #[test]
    fn test_payload_parse_from_serde() {
        let err = serde_json::from_slice::<serde_json::Value>(b"{").unwrap_err();
        let err: WebhookError = err.into();
        assert!(matches!(err, WebhookError::PayloadParse(_)));
    }
}
