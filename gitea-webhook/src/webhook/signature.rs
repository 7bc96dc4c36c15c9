//! Gitea webhook signature verification.
//!
//! Gitea signs the raw request body with HMAC-SHA256 using the secret
//! configured on the hook, and sends the lowercase hex digest in
//! `X-Gitea-Signature` (no `sha256=` prefix).

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the event type.
pub const EVENT_HEADER: &str = "X-Gitea-Event";

/// Header carrying the hex HMAC-SHA256 of the body.
pub const SIGNATURE_HEADER: &str = "X-Gitea-Signature";

/// Computes the lowercase hex HMAC-SHA256 of `payload` keyed with `secret`.
///
/// This is the value Gitea puts in `X-Gitea-Signature`.
///
/// # Examples
///
/// ```
/// use gitea_webhook::signature::{compute_signature, verify_signature};
///
/// let body = br#"{"ref":"refs/heads/main"}"#;
/// let signature = compute_signature(body, b"s3cr3t");
///
/// assert_eq!(signature.len(), 64);
/// assert!(verify_signature(body, &signature, b"s3cr3t"));
/// ```
pub fn compute_signature(payload: &[u8], secret: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Verifies `signature` against HMAC-SHA256(`secret`, `payload`).
///
/// The hex strings are compared in constant time. A signature of the wrong
/// length, in uppercase hex, or with a `sha256=` prefix never matches.
pub fn verify_signature(payload: &[u8], signature: &str, secret: &[u8]) -> bool {
    let mut mac = match HmacSha256::new_from_slice(secret) {
        Ok(m) => m,
        Err(_) => return false,
    };
    mac.update(payload);

    let expected = hex::encode(mac.finalize().into_bytes());

    constant_time_compare(expected.as_bytes(), signature.as_bytes())
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
