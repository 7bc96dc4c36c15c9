//! Records embedded in several payload shapes.
//!
//! These follow Gitea's JSON field names. Every field defaults when absent and
//! `null` arrays decode as empty, so partial payloads still deserialize.
//! Timestamps are kept as the RFC 3339 strings Gitea sends.

use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize `null` as `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A Gitea user or organization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: i64,
    pub login: String,
    pub login_name: String,
    pub full_name: String,
    pub email: String,
    pub avatar_url: String,
    pub html_url: String,
    pub language: String,
    pub is_admin: bool,
    pub last_login: String,
    pub created: String,
    pub restricted: bool,
    pub active: bool,
    pub prohibit_login: bool,
    pub location: String,
    pub website: String,
    pub description: String,
    pub visibility: String,
    pub followers_count: i64,
    pub following_count: i64,
    pub starred_repos_count: i64,
    pub username: String,
}

/// Permissions the sender has on a repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Permission {
    pub admin: bool,
    pub push: bool,
    pub pull: bool,
}

/// A repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Repository {
    pub id: i64,
    pub owner: Option<User>,
    pub name: String,
    pub full_name: String,
    pub description: String,
    pub empty: bool,
    pub private: bool,
    pub fork: bool,
    pub template: bool,
    pub parent: Option<Box<Repository>>,
    pub mirror: bool,
    pub size: i64,
    pub language: String,
    pub html_url: String,
    pub url: String,
    pub ssh_url: String,
    pub clone_url: String,
    pub original_url: String,
    pub website: String,
    pub stars_count: i64,
    pub forks_count: i64,
    pub watchers_count: i64,
    pub open_issues_count: i64,
    pub open_pr_counter: i64,
    pub release_counter: i64,
    pub default_branch: String,
    pub archived: bool,
    pub created_at: String,
    pub updated_at: String,
    pub permissions: Option<Permission>,
    pub has_issues: bool,
    pub has_wiki: bool,
    pub has_pull_requests: bool,
    pub has_projects: bool,
    pub has_releases: bool,
    pub internal: bool,
}

/// The short repository reference embedded in an issue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryMeta {
    pub id: i64,
    pub name: String,
    pub owner: String,
    pub full_name: String,
}

/// Author or committer of a pushed commit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayloadUser {
    pub name: String,
    pub email: String,
    pub username: String,
}

/// GPG/SSH verification state of a pushed commit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayloadCommitVerification {
    pub verified: bool,
    pub reason: String,
    pub signature: String,
    pub signer: Option<PayloadUser>,
    pub payload: String,
}

/// A commit included in a push.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayloadCommit {
    pub id: String,
    pub message: String,
    pub url: String,
    pub author: Option<PayloadUser>,
    pub committer: Option<PayloadUser>,
    pub verification: Option<PayloadCommitVerification>,
    pub timestamp: String,
    #[serde(deserialize_with = "null_as_default")]
    pub added: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub removed: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub modified: Vec<String>,
}

/// An issue or pull request label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Label {
    pub id: i64,
    pub name: String,
    pub exclusive: bool,
    pub is_archived: bool,
    pub color: String,
    pub description: String,
    pub url: String,
}

/// A milestone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Milestone {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub state: String,
    pub open_issues: i64,
    pub closed_issues: i64,
    pub created_at: String,
    pub updated_at: String,
    pub closed_at: Option<String>,
    pub due_on: Option<String>,
}

/// A file attached to an issue, comment or release.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attachment {
    pub id: i64,
    pub name: String,
    pub size: i64,
    pub download_count: i64,
    pub created_at: String,
    pub uuid: String,
    pub browser_download_url: String,
}

/// Pull request state attached to an issue that is a pull request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequestMeta {
    pub merged: bool,
    pub merged_at: Option<String>,
    pub draft: bool,
    pub html_url: String,
}

/// An issue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Issue {
    pub id: i64,
    pub url: String,
    pub html_url: String,
    pub number: i64,
    pub user: Option<User>,
    pub original_author: String,
    pub original_author_id: i64,
    pub title: String,
    pub body: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
    #[serde(deserialize_with = "null_as_default")]
    pub assets: Vec<Attachment>,
    #[serde(deserialize_with = "null_as_default")]
    pub labels: Vec<Label>,
    pub milestone: Option<Milestone>,
    pub assignee: Option<User>,
    #[serde(deserialize_with = "null_as_default")]
    pub assignees: Vec<User>,
    pub state: String,
    pub is_locked: bool,
    pub comments: i64,
    pub created_at: String,
    pub updated_at: String,
    pub closed_at: Option<String>,
    pub due_date: Option<String>,
    pub pull_request: Option<PullRequestMeta>,
    pub repository: Option<RepositoryMeta>,
    pub pin_order: i64,
}

/// A comment on an issue or pull request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Comment {
    pub id: i64,
    pub html_url: String,
    pub pull_request_url: String,
    pub issue_url: String,
    pub user: Option<User>,
    pub original_author: String,
    pub original_author_id: i64,
    pub body: String,
    #[serde(deserialize_with = "null_as_default")]
    pub assets: Vec<Attachment>,
    pub created_at: String,
    pub updated_at: String,
}

/// One side (base or head) of a pull request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrBranchInfo {
    pub label: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub sha: String,
    pub repo_id: i64,
    pub repo: Option<Repository>,
}

/// A pull request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequest {
    pub id: i64,
    pub url: String,
    pub number: i64,
    pub user: Option<User>,
    pub title: String,
    pub body: String,
    #[serde(deserialize_with = "null_as_default")]
    pub labels: Vec<Label>,
    pub milestone: Option<Milestone>,
    pub assignee: Option<User>,
    #[serde(deserialize_with = "null_as_default")]
    pub assignees: Vec<User>,
    #[serde(deserialize_with = "null_as_default")]
    pub requested_reviewers: Vec<User>,
    pub state: String,
    pub draft: bool,
    pub is_locked: bool,
    pub comments: i64,
    pub additions: i64,
    pub deletions: i64,
    pub changed_files: i64,
    pub html_url: String,
    pub diff_url: String,
    pub patch_url: String,
    pub mergeable: bool,
    pub merged: bool,
    pub merged_at: Option<String>,
    pub merge_commit_sha: Option<String>,
    pub merged_by: Option<User>,
    pub allow_maintainer_edit: bool,
    pub base: Option<PrBranchInfo>,
    pub head: Option<PrBranchInfo>,
    pub merge_base: String,
    pub due_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub closed_at: Option<String>,
    pub pin_order: i64,
}

/// A release.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Release {
    pub id: i64,
    pub tag_name: String,
    pub target_commitish: String,
    pub name: String,
    pub body: String,
    pub url: String,
    pub html_url: String,
    pub tarball_url: String,
    pub zipball_url: String,
    pub upload_url: String,
    pub draft: bool,
    pub prerelease: bool,
    pub created_at: String,
    pub published_at: String,
    pub author: Option<User>,
    #[serde(deserialize_with = "null_as_default")]
    pub assets: Vec<Attachment>,
}

/// A published package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Package {
    pub id: i64,
    pub owner: Option<User>,
    pub repository: Option<Repository>,
    pub creator: Option<User>,
    #[serde(rename = "type")]
    pub package_type: String,
    pub name: String,
    pub version: String,
    pub html_url: String,
    pub created_at: String,
}

/// Previous value of an edited field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangesFromPayload {
    pub from: String,
}

/// Fields changed by an `edited` action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangesPayload {
    pub title: Option<ChangesFromPayload>,
    pub body: Option<ChangesFromPayload>,
    #[serde(rename = "ref")]
    pub git_ref: Option<ChangesFromPayload>,
}

/// Review attached to a pull request review event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewPayload {
    #[serde(rename = "type")]
    pub review_type: String,
    pub content: String,
}
