//! Decoded webhook payloads.
//!
//! ## Shapes
//!
//! ```text
//! create                 → Create
//! delete                 → Delete
//! fork                   → Fork
//! push                   → Push
//! issues, issue_*        → Issue
//! issue_comment          → IssueComment
//! pull_request*          → PullRequest
//! repository             → Repository
//! release                → Release
//! wiki                   → Wiki
//! package                → Package
//! ```

pub mod common;
pub mod types;

use serde::de::DeserializeOwned;

use crate::error::WebhookError;

pub use common::{
    Attachment, ChangesFromPayload, ChangesPayload, Comment, Issue, Label, Milestone, Package,
    PayloadCommit, PayloadCommitVerification, PayloadUser, Permission, PrBranchInfo, PullRequest,
    PullRequestMeta, Release, Repository, RepositoryMeta, ReviewPayload, User,
};
pub use types::{
    CreatePayload, DeletePayload, ForkPayload, IssueCommentPayload, IssuePayload, PackagePayload,
    PullRequestPayload, PushPayload, ReleasePayload, RepositoryPayload, WikiPayload,
};

/// Tag naming which payload shape a [`Payload`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    Create,
    Delete,
    Fork,
    Push,
    Issue,
    IssueComment,
    PullRequest,
    Repository,
    Release,
    Wiki,
    Package,
}

impl PayloadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadKind::Create => "create",
            PayloadKind::Delete => "delete",
            PayloadKind::Fork => "fork",
            PayloadKind::Push => "push",
            PayloadKind::Issue => "issue",
            PayloadKind::IssueComment => "issue_comment",
            PayloadKind::PullRequest => "pull_request",
            PayloadKind::Repository => "repository",
            PayloadKind::Release => "release",
            PayloadKind::Wiki => "wiki",
            PayloadKind::Package => "package",
        }
    }
}

/// A decoded webhook body.
///
/// The variant is chosen by the event type, so a caller that accepted only
/// `push` can match on [`Payload::Push`] alone.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Create(CreatePayload),
    Delete(DeletePayload),
    Fork(ForkPayload),
    Push(PushPayload),
    Issue(IssuePayload),
    IssueComment(IssueCommentPayload),
    PullRequest(PullRequestPayload),
    Repository(RepositoryPayload),
    Release(ReleasePayload),
    Wiki(WikiPayload),
    Package(PackagePayload),
}

impl Payload {
    /// Deserialize `body` into the shape named by `kind`.
    pub fn from_slice(kind: PayloadKind, body: &[u8]) -> Result<Self, WebhookError> {
        let payload = match kind {
            PayloadKind::Create => Payload::Create(from_json(body)?),
            PayloadKind::Delete => Payload::Delete(from_json(body)?),
            PayloadKind::Fork => Payload::Fork(from_json(body)?),
            PayloadKind::Push => Payload::Push(from_json(body)?),
            PayloadKind::Issue => Payload::Issue(from_json(body)?),
            PayloadKind::IssueComment => Payload::IssueComment(from_json(body)?),
            PayloadKind::PullRequest => Payload::PullRequest(from_json(body)?),
            PayloadKind::Repository => Payload::Repository(from_json(body)?),
            PayloadKind::Release => Payload::Release(from_json(body)?),
            PayloadKind::Wiki => Payload::Wiki(from_json(body)?),
            PayloadKind::Package => Payload::Package(from_json(body)?),
        };
        Ok(payload)
    }

    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::Create(_) => PayloadKind::Create,
            Payload::Delete(_) => PayloadKind::Delete,
            Payload::Fork(_) => PayloadKind::Fork,
            Payload::Push(_) => PayloadKind::Push,
            Payload::Issue(_) => PayloadKind::Issue,
            Payload::IssueComment(_) => PayloadKind::IssueComment,
            Payload::PullRequest(_) => PayloadKind::PullRequest,
            Payload::Repository(_) => PayloadKind::Repository,
            Payload::Release(_) => PayloadKind::Release,
            Payload::Wiki(_) => PayloadKind::Wiki,
            Payload::Package(_) => PayloadKind::Package,
        }
    }

    /// The repository the event belongs to, when the body carried one.
    pub fn repository(&self) -> Option<&Repository> {
        match self {
            Payload::Create(p) => p.repository.as_ref(),
            Payload::Delete(p) => p.repository.as_ref(),
            Payload::Fork(p) => p.repository.as_ref(),
            Payload::Push(p) => p.repository.as_ref(),
            Payload::Issue(p) => p.repository.as_ref(),
            Payload::IssueComment(p) => p.repository.as_ref(),
            Payload::PullRequest(p) => p.repository.as_ref(),
            Payload::Repository(p) => p.repository.as_ref(),
            Payload::Release(p) => p.repository.as_ref(),
            Payload::Wiki(p) => p.repository.as_ref(),
            Payload::Package(p) => p.repository.as_ref(),
        }
    }

    /// The user who triggered the event.
    pub fn sender(&self) -> Option<&User> {
        match self {
            Payload::Create(p) => p.sender.as_ref(),
            Payload::Delete(p) => p.sender.as_ref(),
            Payload::Fork(p) => p.sender.as_ref(),
            Payload::Push(p) => p.sender.as_ref(),
            Payload::Issue(p) => p.sender.as_ref(),
            Payload::IssueComment(p) => p.sender.as_ref(),
            Payload::PullRequest(p) => p.sender.as_ref(),
            Payload::Repository(p) => p.sender.as_ref(),
            Payload::Release(p) => p.sender.as_ref(),
            Payload::Wiki(p) => p.sender.as_ref(),
            Payload::Package(p) => p.sender.as_ref(),
        }
    }
}

fn from_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, WebhookError> {
    Ok(serde_json::from_slice(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slice_selects_shape() {
        let payload = Payload::from_slice(PayloadKind::Release, br#"{"action": "published"}"#)
            .unwrap();
        assert_eq!(payload.kind(), PayloadKind::Release);
        match payload {
            Payload::Release(p) => assert_eq!(p.action, "published"),
            _ => panic!("Expected Release variant"),
        }
    }

    #[test]
    fn test_from_slice_rejects_invalid_json() {
        let result = Payload::from_slice(PayloadKind::Push, b"{not json");
        assert!(matches!(result, Err(WebhookError::PayloadParse(_))));
    }

    #[test]
    fn test_from_slice_rejects_non_object() {
        let result = Payload::from_slice(PayloadKind::Wiki, b"42");
        assert!(matches!(result, Err(WebhookError::PayloadParse(_))));
    }

    #[test]
    fn test_repository_and_sender_accessors() {
        let body = br#"{
            "action": "created",
            "repository": {"full_name": "gitea/webhooks"},
            "sender": {"login": "gitea"}
        }"#;
        let payload = Payload::from_slice(PayloadKind::Repository, body).unwrap();

        assert_eq!(
            payload.repository().map(|r| r.full_name.as_str()),
            Some("gitea/webhooks")
        );
        assert_eq!(payload.sender().map(|u| u.login.as_str()), Some("gitea"));
    }

    #[test]
    fn test_accessors_absent() {
        let payload = Payload::from_slice(PayloadKind::Fork, b"{}").unwrap();
        assert!(payload.repository().is_none());
        assert!(payload.sender().is_none());
    }
}
