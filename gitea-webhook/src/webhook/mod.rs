//! Gitea webhook verification and decoding.
//!
//! [`Webhook::parse`] runs the checks below in order and stops at the first
//! failure:
//!
//! 1. at least one accepted event was given
//! 2. the method is POST
//! 3. `X-Gitea-Event` is present
//! 4. the event is one of the accepted events
//! 5. the body is readable and non-empty
//! 6. `X-Gitea-Signature` matches, when a secret is configured
//! 7. the body decodes into the event's payload shape
//!
//! The request body is drained and released on every path.

mod body;
pub mod options;
pub mod signature;

use std::borrow::Cow;
use std::io::{self, Read};

use http::{HeaderMap, Method, Request};

use crate::error::{ConfigError, WebhookError};
use crate::events::HookEventType;
use crate::payload::Payload;

use body::DrainOnDrop;
pub use options::WebhookOption;
use signature::{verify_signature, EVENT_HEADER, SIGNATURE_HEADER};

/// Verifies and decodes Gitea webhook deliveries.
///
/// Immutable once built; share it freely between requests and threads.
#[derive(Clone, Default)]
pub struct Webhook {
    secret: Option<Vec<u8>>,
}

impl Webhook {
    /// Build a webhook verifier from options, applied in order.
    pub fn new(options: impl IntoIterator<Item = WebhookOption>) -> Result<Self, ConfigError> {
        let mut hook = Webhook::default();
        for option in options {
            let secret = option.resolve_secret()?;
            hook.secret = if secret.is_empty() {
                None
            } else {
                Some(secret.into_bytes())
            };
        }
        Ok(hook)
    }

    pub fn builder() -> WebhookBuilder {
        WebhookBuilder::default()
    }

    /// Whether deliveries must carry a valid `X-Gitea-Signature`.
    pub fn has_secret(&self) -> bool {
        self.secret.is_some()
    }

    /// Verify a delivery and decode its body.
    ///
    /// `events` lists the event types the caller is prepared to handle; any
    /// other event is rejected with [`WebhookError::EventNotAccepted`] before
    /// the body is read or the signature checked.
    ///
    /// # Examples
    ///
    /// ```
    /// use gitea_webhook::{options, HookEventType, Payload, Webhook};
    /// use gitea_webhook::signature::compute_signature;
    ///
    /// let hook = Webhook::new([options::secret("s3cr3t")]).unwrap();
    /// let body = br#"{"ref":"refs/heads/main"}"#;
    ///
    /// let request = http::Request::post("/webhooks/gitea")
    ///     .header("X-Gitea-Event", "push")
    ///     .header("X-Gitea-Signature", compute_signature(body, b"s3cr3t"))
    ///     .body(&body[..])
    ///     .unwrap();
    ///
    /// match hook.parse(request, &[HookEventType::Push]).unwrap() {
    ///     Payload::Push(push) => assert_eq!(push.git_ref, "refs/heads/main"),
    ///     other => panic!("unexpected payload: {:?}", other.kind()),
    /// }
    /// ```
    pub fn parse<R: Read>(
        &self,
        request: Request<R>,
        events: &[HookEventType],
    ) -> Result<Payload, WebhookError> {
        let (parts, body) = request.into_parts();
        let mut body = DrainOnDrop::new(body);

        self.verify_and_decode(&parts.method, &parts.headers, &mut body, events)
    }

    fn verify_and_decode<R: Read>(
        &self,
        method: &Method,
        headers: &HeaderMap,
        body: &mut DrainOnDrop<R>,
        events: &[HookEventType],
    ) -> Result<Payload, WebhookError> {
        if events.is_empty() {
            return Err(WebhookError::NoEventsSpecified);
        }

        if *method != Method::POST {
            return Err(WebhookError::InvalidMethod(method.clone()));
        }

        let event = header_value(headers, EVENT_HEADER).ok_or(WebhookError::MissingEventHeader)?;

        if !events.iter().any(|accepted| accepted.as_str() == event) {
            return Err(WebhookError::EventNotAccepted(event.into_owned()));
        }

        let payload = body.read_all().map_err(WebhookError::PayloadRead)?;
        if payload.is_empty() {
            return Err(WebhookError::PayloadRead(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "empty payload",
            )));
        }

        if let Some(secret) = &self.secret {
            let signature = header_value(headers, SIGNATURE_HEADER)
                .ok_or(WebhookError::MissingSignatureHeader)?;

            if !verify_signature(&payload, &signature, secret) {
                return Err(WebhookError::SignatureMismatch);
            }
        }

        decode(&event, &payload)
    }
}

impl std::fmt::Debug for Webhook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Webhook")
            .field("has_secret", &self.has_secret())
            .finish()
    }
}

/// Builder for [`Webhook`].
#[derive(Debug, Default)]
pub struct WebhookBuilder {
    options: Vec<WebhookOption>,
}

impl WebhookBuilder {
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.options.push(options::secret(secret));
        self
    }

    pub fn secret_file(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.options.push(options::secret_file(path));
        self
    }

    pub fn option(mut self, option: WebhookOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn build(self) -> Result<Webhook, ConfigError> {
        Webhook::new(self.options)
    }
}

/// Decode an already-verified body for the given `X-Gitea-Event` value.
///
/// Useful for replaying stored deliveries. Fails with
/// [`WebhookError::UnknownEvent`] if `event` is not a Gitea event type.
pub fn decode(event: &str, body: &[u8]) -> Result<Payload, WebhookError> {
    let event: HookEventType = event.parse()?;
    Payload::from_slice(event.payload_kind(), body)
}

/// A non-empty header value. Non-UTF-8 bytes are replaced rather than
/// treated as absent, so they fail the later equality checks.
fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<Cow<'a, str>> {
    let value = headers.get(name)?;
    if value.is_empty() {
        return None;
    }
    Some(String::from_utf8_lossy(value.as_bytes()))
}
