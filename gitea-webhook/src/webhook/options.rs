//! Construction options for [`Webhook`](super::Webhook).
//!
//! ```
//! use gitea_webhook::{options, Webhook};
//!
//! let hook = Webhook::new([options::secret("s3cr3t")]).unwrap();
//! assert!(hook.has_secret());
//!
//! let hook = Webhook::builder().secret("s3cr3t").build().unwrap();
//! assert!(hook.has_secret());
//! ```

use std::fs;
use std::path::PathBuf;

use crate::error::ConfigError;

/// A single configuration step applied when building a [`Webhook`](super::Webhook).
#[derive(Clone)]
pub enum WebhookOption {
    /// Verify `X-Gitea-Signature` with this secret. An empty secret disables
    /// verification.
    Secret(String),
    /// Read the secret from a file, dropping a trailing newline.
    SecretFile(PathBuf),
}

impl WebhookOption {
    /// Resolve the option to the secret it sets.
    pub(crate) fn resolve_secret(self) -> Result<String, ConfigError> {
        match self {
            WebhookOption::Secret(secret) => Ok(secret),
            WebhookOption::SecretFile(path) => {
                let raw = fs::read_to_string(&path)
                    .map_err(|source| ConfigError::SecretFile { path, source })?;
                Ok(raw.trim_end_matches(['\r', '\n']).to_string())
            }
        }
    }
}

impl std::fmt::Debug for WebhookOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WebhookOption::Secret(_) => f.write_str("Secret(<redacted>)"),
            WebhookOption::SecretFile(path) => f.debug_tuple("SecretFile").field(path).finish(),
        }
    }
}

/// Sets the shared secret used to verify `X-Gitea-Signature`.
pub fn secret(secret: impl Into<String>) -> WebhookOption {
    WebhookOption::Secret(secret.into())
}

/// Loads the shared secret from a file (e.g. a mounted container secret).
pub fn secret_file(path: impl Into<PathBuf>) -> WebhookOption {
    WebhookOption::SecretFile(path.into())
}
