use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Represents a GitHub user profile from the `/users/{username}` API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub bio: Option<String>,
    pub public_repos: u32,
    pub public_gists: u32,
    pub followers: u32,
    pub following: u32,
    pub html_url: String,
}

/// A single record from the `/users/{username}/events` feed.
///
/// Only the fields the activity list needs are decoded; the feed mixes many
/// event types whose payloads are otherwise ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub repo: RawRepo,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub payload: Option<RawPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRepo {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPayload {
    #[serde(default)]
    pub commits: Vec<RawCommit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCommit {
    pub message: String,
}

/// Event kinds kept in the activity list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Push,
    PullRequest,
}

impl ActivityKind {
    /// Maps the feed's `type` discriminant, `None` for every other kind.
    pub fn from_event_type(kind: &str) -> Option<Self> {
        match kind {
            "PushEvent" => Some(Self::Push),
            "PullRequestEvent" => Some(Self::PullRequest),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Push => "Push",
            Self::PullRequest => "Pull Request",
        }
    }
}

/// A normalized entry of the activity list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEvent {
    pub kind: ActivityKind,
    pub repo: String,
    pub created_at: DateTime<Utc>,
    /// Empty unless `kind` is [`ActivityKind::Push`].
    pub commits: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_profile_with_null_name_and_bio() {
        let body = r#"{
            "login": "octocat",
            "id": 583231,
            "name": null,
            "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4",
            "bio": null,
            "public_repos": 8,
            "public_gists": 8,
            "followers": 20000,
            "following": 9,
            "html_url": "https://github.com/octocat"
        }"#;

        let user: GitHubUser = serde_json::from_str(body).unwrap();
        assert_eq!(user.login, "octocat");
        assert_eq!(user.name, None);
        assert_eq!(user.bio, None);
        assert_eq!(user.public_gists, 8);
        assert_eq!(user.followers, 20000);
    }

    #[test]
    fn decodes_event_without_payload_commits() {
        let body = r#"{
            "type": "WatchEvent",
            "repo": { "id": 1, "name": "rust-lang/rust" },
            "created_at": "2024-03-05T14:07:00Z",
            "payload": { "action": "started" }
        }"#;

        let event: RawEvent = serde_json::from_str(body).unwrap();
        assert_eq!(event.kind, "WatchEvent");
        assert_eq!(event.repo.name, "rust-lang/rust");
        assert!(event.payload.unwrap().commits.is_empty());
    }

    #[test]
    fn only_push_and_pull_request_map_to_a_kind() {
        assert_eq!(ActivityKind::from_event_type("PushEvent"), Some(ActivityKind::Push));
        assert_eq!(
            ActivityKind::from_event_type("PullRequestEvent"),
            Some(ActivityKind::PullRequest)
        );
        assert_eq!(ActivityKind::from_event_type("PullRequestReviewEvent"), None);
        assert_eq!(ActivityKind::from_event_type("WatchEvent"), None);
    }
}
