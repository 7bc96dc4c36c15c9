//! Top-level payload shapes, one per group of Gitea events.

use serde::{Deserialize, Serialize};

use super::common::{
    null_as_default, ChangesPayload, Comment, Issue, Package, PayloadCommit, PullRequest,
    Release, Repository, ReviewPayload, User,
};

/// `create`: a branch or tag was created.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatePayload {
    pub sha: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub ref_type: String,
    pub repository: Option<Repository>,
    pub sender: Option<User>,
}

/// `delete`: a branch or tag was deleted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeletePayload {
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub ref_type: String,
    pub pusher_type: String,
    pub repository: Option<Repository>,
    pub sender: Option<User>,
}

/// `fork`: the repository was forked into `forkee`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForkPayload {
    pub forkee: Option<Repository>,
    pub repository: Option<Repository>,
    pub sender: Option<User>,
}

/// `push`: commits were pushed to a ref.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushPayload {
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub before: String,
    pub after: String,
    pub compare_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub commits: Vec<PayloadCommit>,
    pub total_commits: i64,
    pub head_commit: Option<PayloadCommit>,
    pub repository: Option<Repository>,
    pub pusher: Option<User>,
    pub sender: Option<User>,
}

impl PushPayload {
    /// The branch name, if the ref is a branch.
    pub fn branch(&self) -> Option<&str> {
        self.git_ref.strip_prefix("refs/heads/")
    }

    /// The tag name, if the ref is a tag.
    pub fn tag(&self) -> Option<&str> {
        self.git_ref.strip_prefix("refs/tags/")
    }
}

/// `issues`, `issue_assign`, `issue_label`, `issue_milestone`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssuePayload {
    pub action: String,
    pub number: i64,
    pub changes: Option<ChangesPayload>,
    pub issue: Option<Issue>,
    pub repository: Option<Repository>,
    pub sender: Option<User>,
    pub commit_id: String,
}

/// `issue_comment`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueCommentPayload {
    pub action: String,
    pub issue: Option<Issue>,
    pub pull_request: Option<PullRequest>,
    pub comment: Option<Comment>,
    pub changes: Option<ChangesPayload>,
    pub repository: Option<Repository>,
    pub sender: Option<User>,
    pub is_pull: bool,
}

/// Every `pull_request*` event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequestPayload {
    pub action: String,
    pub number: i64,
    pub changes: Option<ChangesPayload>,
    pub pull_request: Option<PullRequest>,
    pub requested_reviewer: Option<User>,
    pub repository: Option<Repository>,
    pub sender: Option<User>,
    pub commit_id: String,
    pub review: Option<ReviewPayload>,
}

/// `repository`: a repository was created or deleted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryPayload {
    pub action: String,
    pub repository: Option<Repository>,
    pub organization: Option<User>,
    pub sender: Option<User>,
}

/// `release`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleasePayload {
    pub action: String,
    pub release: Option<Release>,
    pub repository: Option<Repository>,
    pub sender: Option<User>,
}

/// `wiki`: a wiki page was created, edited, renamed or deleted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WikiPayload {
    pub action: String,
    pub repository: Option<Repository>,
    pub sender: Option<User>,
    pub page: String,
    pub comment: String,
}

/// `package`: a package was published or deleted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackagePayload {
    pub action: String,
    pub repository: Option<Repository>,
    pub package: Option<Package>,
    pub sender: Option<User>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_payload_full() {
        let json = r#"{
            "ref": "refs/heads/main",
            "before": "0000000000000000000000000000000000000000",
            "after": "bffeb74224043ba2feb48d137756c8a9331c449a",
            "compare_url": "http://localhost:3000/gitea/webhooks/compare/0000...bffe",
            "commits": [
                {
                    "id": "bffeb74224043ba2feb48d137756c8a9331c449a",
                    "message": "Webhooks Yay!",
                    "url": "http://localhost:3000/gitea/webhooks/commit/bffeb74224043ba2feb48d137756c8a9331c449a",
                    "author": {"name": "Gitea", "email": "someone@gitea.io", "username": "gitea"},
                    "committer": {"name": "Gitea", "email": "someone@gitea.io", "username": "gitea"},
                    "verification": null,
                    "timestamp": "2017-03-13T13:52:11-04:00",
                    "added": [],
                    "removed": null,
                    "modified": ["README.md"]
                }
            ],
            "total_commits": 1,
            "head_commit": null,
            "repository": {
                "id": 140,
                "owner": {"id": 1, "login": "gitea", "username": "gitea"},
                "name": "webhooks",
                "full_name": "gitea/webhooks",
                "private": false,
                "default_branch": "main"
            },
            "pusher": {"id": 1, "login": "gitea"},
            "sender": {"id": 1, "login": "gitea"}
        }"#;

        let payload: PushPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.branch(), Some("main"));
        assert_eq!(payload.tag(), None);
        assert_eq!(payload.commits.len(), 1);
        assert_eq!(payload.commits[0].modified, vec!["README.md".to_string()]);
        assert!(payload.commits[0].removed.is_empty());
        assert!(payload.head_commit.is_none());
        assert_eq!(
            payload.repository.as_ref().map(|r| r.full_name.as_str()),
            Some("gitea/webhooks")
        );
    }

    #[test]
    fn test_push_payload_tag_ref() {
        let payload: PushPayload = serde_json::from_str(r#"{"ref": "refs/tags/v1.0.0"}"#).unwrap();
        assert_eq!(payload.tag(), Some("v1.0.0"));
        assert_eq!(payload.branch(), None);
    }

    #[test]
    fn test_pull_request_payload_with_review() {
        let json = r#"{
            "action": "reviewed",
            "number": 7,
            "pull_request": {
                "number": 7,
                "title": "Add webhooks",
                "base": {"ref": "main", "sha": "aaa"},
                "head": {"ref": "feature", "sha": "bbb"},
                "labels": null
            },
            "review": {"type": "pull_request_review_approved", "content": "LGTM"}
        }"#;

        let payload: PullRequestPayload = serde_json::from_str(json).unwrap();
        let pr = payload.pull_request.unwrap();
        assert_eq!(pr.title, "Add webhooks");
        assert_eq!(pr.head.unwrap().git_ref, "feature");
        assert_eq!(payload.review.unwrap().content, "LGTM");
    }

    #[test]
    fn test_package_payload() {
        let json = r#"{
            "action": "created",
            "package": {"id": 3, "type": "cargo", "name": "gitea-webhook", "version": "0.1.0"}
        }"#;

        let payload: PackagePayload = serde_json::from_str(json).unwrap();
        let package = payload.package.unwrap();
        assert_eq!(package.package_type, "cargo");
        assert_eq!(package.version, "0.1.0");
    }
}
