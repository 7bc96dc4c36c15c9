//! Gitea webhook event identifiers.
//!
//! The `X-Gitea-Event` header carries one of these tokens. Matching is exact and
//! case-sensitive.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WebhookError;
use crate::payload::PayloadKind;

/// A Gitea hook event type, as sent in `X-Gitea-Event`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookEventType {
    Create,
    Delete,
    Fork,
    Push,
    Issues,
    IssueAssign,
    IssueLabel,
    IssueMilestone,
    IssueComment,
    PullRequest,
    PullRequestAssign,
    PullRequestLabel,
    PullRequestMilestone,
    PullRequestComment,
    PullRequestReviewApproved,
    PullRequestReviewRejected,
    PullRequestReviewComment,
    PullRequestSync,
    Wiki,
    Repository,
    Release,
    Package,
}

impl HookEventType {
    /// Every event type Gitea can deliver.
    pub const ALL: [HookEventType; 22] = [
        HookEventType::Create,
        HookEventType::Delete,
        HookEventType::Fork,
        HookEventType::Push,
        HookEventType::Issues,
        HookEventType::IssueAssign,
        HookEventType::IssueLabel,
        HookEventType::IssueMilestone,
        HookEventType::IssueComment,
        HookEventType::PullRequest,
        HookEventType::PullRequestAssign,
        HookEventType::PullRequestLabel,
        HookEventType::PullRequestMilestone,
        HookEventType::PullRequestComment,
        HookEventType::PullRequestReviewApproved,
        HookEventType::PullRequestReviewRejected,
        HookEventType::PullRequestReviewComment,
        HookEventType::PullRequestSync,
        HookEventType::Wiki,
        HookEventType::Repository,
        HookEventType::Release,
        HookEventType::Package,
    ];

    /// The wire token for this event.
    pub fn as_str(&self) -> &'static str {
        match self {
            HookEventType::Create => "create",
            HookEventType::Delete => "delete",
            HookEventType::Fork => "fork",
            HookEventType::Push => "push",
            HookEventType::Issues => "issues",
            HookEventType::IssueAssign => "issue_assign",
            HookEventType::IssueLabel => "issue_label",
            HookEventType::IssueMilestone => "issue_milestone",
            HookEventType::IssueComment => "issue_comment",
            HookEventType::PullRequest => "pull_request",
            HookEventType::PullRequestAssign => "pull_request_assign",
            HookEventType::PullRequestLabel => "pull_request_label",
            HookEventType::PullRequestMilestone => "pull_request_milestone",
            HookEventType::PullRequestComment => "pull_request_comment",
            HookEventType::PullRequestReviewApproved => "pull_request_review_approved",
            HookEventType::PullRequestReviewRejected => "pull_request_review_rejected",
            HookEventType::PullRequestReviewComment => "pull_request_review_comment",
            HookEventType::PullRequestSync => "pull_request_sync",
            HookEventType::Wiki => "wiki",
            HookEventType::Repository => "repository",
            HookEventType::Release => "release",
            HookEventType::Package => "package",
        }
    }

    /// The payload shape Gitea sends for this event.
    ///
    /// Several event types share a shape: all issue variants decode to
    /// [`PayloadKind::Issue`] and all pull request variants to
    /// [`PayloadKind::PullRequest`].
    pub fn payload_kind(&self) -> PayloadKind {
        match self {
            HookEventType::Create => PayloadKind::Create,
            HookEventType::Delete => PayloadKind::Delete,
            HookEventType::Fork => PayloadKind::Fork,
            HookEventType::Push => PayloadKind::Push,
            HookEventType::Issues
            | HookEventType::IssueAssign
            | HookEventType::IssueLabel
            | HookEventType::IssueMilestone => PayloadKind::Issue,
            HookEventType::IssueComment => PayloadKind::IssueComment,
            HookEventType::PullRequest
            | HookEventType::PullRequestAssign
            | HookEventType::PullRequestLabel
            | HookEventType::PullRequestMilestone
            | HookEventType::PullRequestComment
            | HookEventType::PullRequestReviewApproved
            | HookEventType::PullRequestReviewRejected
            | HookEventType::PullRequestReviewComment
            | HookEventType::PullRequestSync => PayloadKind::PullRequest,
            HookEventType::Wiki => PayloadKind::Wiki,
            HookEventType::Repository => PayloadKind::Repository,
            HookEventType::Release => PayloadKind::Release,
            HookEventType::Package => PayloadKind::Package,
        }
    }
}

impl fmt::Display for HookEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HookEventType {
    type Err = WebhookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HookEventType::ALL
            .iter()
            .copied()
            .find(|event| event.as_str() == s)
            .ok_or_else(|| WebhookError::UnknownEvent(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_roundtrips_every_event() {
        for event in HookEventType::ALL {
            assert_eq!(event.as_str().parse::<HookEventType>().unwrap(), event);
        }
    }

    #[test]
    fn test_from_str_is_case_sensitive() {
        assert!(matches!(
            "Push".parse::<HookEventType>(),
            Err(WebhookError::UnknownEvent(ref e)) if e == "Push"
        ));
        assert!("noneexistant_event".parse::<HookEventType>().is_err());
        assert!("".parse::<HookEventType>().is_err());
    }

    #[test]
    fn test_serde_uses_wire_token() {
        let json = serde_json::to_string(&HookEventType::PullRequestReviewApproved).unwrap();
        assert_eq!(json, "\"pull_request_review_approved\"");

        let parsed: HookEventType = serde_json::from_str("\"issue_milestone\"").unwrap();
        assert_eq!(parsed, HookEventType::IssueMilestone);
    }

    #[test]
    fn test_payload_kind_mapping() {
        assert_eq!(HookEventType::Push.payload_kind(), PayloadKind::Push);
        assert_eq!(HookEventType::IssueLabel.payload_kind(), PayloadKind::Issue);
        assert_eq!(
            HookEventType::IssueComment.payload_kind(),
            PayloadKind::IssueComment
        );
        assert_eq!(
            HookEventType::PullRequestSync.payload_kind(),
            PayloadKind::PullRequest
        );
        assert_eq!(
            HookEventType::PullRequestComment.payload_kind(),
            PayloadKind::PullRequest
        );
        assert_eq!(HookEventType::Package.payload_kind(), PayloadKind::Package);
    }

    #[test]
    fn test_display() {
        assert_eq!(HookEventType::IssueAssign.to_string(), "issue_assign");
    }
}
