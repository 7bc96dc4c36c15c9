//! Configuration module for environment variable parsing.

use std::env;
use std::path::PathBuf;

use tracing::warn;

use crate::events::HookEventType;
use crate::webhook::{options, WebhookOption};

/// Receiver configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    /// Shared secret configured on the Gitea hook
    pub webhook_secret: Option<String>,

    /// File holding the shared secret, used when `webhook_secret` is unset
    pub webhook_secret_file: Option<PathBuf>,

    /// Event types the receiver accepts
    pub events: Vec<HookEventType>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Config {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            webhook_secret: env::var("GITEA_WEBHOOK_SECRET").ok(),

            webhook_secret_file: env::var("GITEA_WEBHOOK_SECRET_FILE").ok().map(PathBuf::from),

            events: parse_events("GITEA_WEBHOOK_EVENTS")
                .unwrap_or_else(|| HookEventType::ALL.to_vec()),
        }
    }

    /// Options for building the [`Webhook`](crate::Webhook) verifier.
    pub fn webhook_options(&self) -> Vec<WebhookOption> {
        match (&self.webhook_secret, &self.webhook_secret_file) {
            (Some(secret), _) => vec![options::secret(secret.clone())],
            (None, Some(path)) => vec![options::secret_file(path.clone())],
            (None, None) => Vec::new(),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("webhook_secret", &self.webhook_secret.as_ref().map(|_| "<redacted>"))
            .field("webhook_secret_file", &self.webhook_secret_file)
            .field("events", &self.events)
            .finish()
    }
}

/// Parse a comma-separated list of event types, skipping unknown ones.
fn parse_events(name: &str) -> Option<Vec<HookEventType>> {
    let tokens = parse_csv(name)?;

    let events = tokens
        .iter()
        .filter_map(|token| match token.parse::<HookEventType>() {
            Ok(event) => Some(event),
            Err(_) => {
                warn!(env_var = name, event = %token, "Unknown event type, skipping");
                None
            }
        })
        .collect();

    Some(events)
}

/// Parse a comma-separated list of strings.
fn parse_csv(name: &str) -> Option<Vec<String>> {
    env::var(name).ok().map(|raw| {
        raw.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv() {
        env::set_var("TEST_GITEA_CSV", "foo, bar, baz");
        let result = parse_csv("TEST_GITEA_CSV");
        assert_eq!(
            result,
            Some(vec!["foo".to_string(), "bar".to_string(), "baz".to_string()])
        );
        env::remove_var("TEST_GITEA_CSV");
    }

    #[test]
    fn test_parse_events_skips_unknown() {
        env::set_var("TEST_GITEA_EVENTS", "push, Push, issues,,nope");
        let result = parse_events("TEST_GITEA_EVENTS");
        assert_eq!(result, Some(vec![HookEventType::Push, HookEventType::Issues]));
        env::remove_var("TEST_GITEA_EVENTS");
    }

    #[test]
    fn test_parse_events_unset() {
        assert_eq!(parse_events("TEST_GITEA_EVENTS_UNSET"), None);
    }

    #[test]
    fn test_webhook_options_prefers_inline_secret() {
        let config = Config {
            port: 8080,
            webhook_secret: Some("inline".to_string()),
            webhook_secret_file: Some(PathBuf::from("/run/secrets/gitea")),
            events: vec![HookEventType::Push],
        };

        let options = config.webhook_options();
        assert_eq!(options.len(), 1);
        assert!(matches!(&options[0], WebhookOption::Secret(s) if s == "inline"));
    }

    #[test]
    fn test_webhook_options_secret_file() {
        let config = Config {
            port: 8080,
            webhook_secret: None,
            webhook_secret_file: Some(PathBuf::from("/run/secrets/gitea")),
            events: vec![HookEventType::Push],
        };

        let options = config.webhook_options();
        assert!(matches!(&options[..], [WebhookOption::SecretFile(_)]));
    }

    #[test]
    fn test_webhook_options_none() {
        let config = Config {
            port: 8080,
            webhook_secret: None,
            webhook_secret_file: None,
            events: HookEventType::ALL.to_vec(),
        };

        assert!(config.webhook_options().is_empty());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = Config {
            port: 8080,
            webhook_secret: Some("hunter2".to_string()),
            webhook_secret_file: None,
            events: vec![],
        };

        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
