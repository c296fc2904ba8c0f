use crate::activity::format_timestamp;
use crate::models::{ActivityEvent, GitHubUser};

pub const NO_BIO_PLACEHOLDER: &str = "No bio available";

/// Display strings for the profile card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileCard {
    pub login: String,
    /// The user's name, or the login when no name is set.
    pub display_name: String,
    pub bio: String,
    pub public_repos: String,
    pub public_gists: String,
    pub followers: String,
    pub following: String,
    pub avatar_url: String,
    pub profile_url: String,
}

impl From<&GitHubUser> for ProfileCard {
    fn from(user: &GitHubUser) -> Self {
        Self {
            login: user.login.clone(),
            display_name: non_empty(user.name.as_deref())
                .unwrap_or(user.login.as_str())
                .to_string(),
            bio: non_empty(user.bio.as_deref())
                .unwrap_or(NO_BIO_PLACEHOLDER)
                .to_string(),
            public_repos: user.public_repos.to_string(),
            public_gists: user.public_gists.to_string(),
            followers: user.followers.to_string(),
            following: user.following.to_string(),
            avatar_url: user.avatar_url.clone(),
            profile_url: user.html_url.clone(),
        }
    }
}

/// Display strings for one activity list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRow {
    pub kind: String,
    pub repo: String,
    /// One `• message` line per commit, empty for pull requests.
    pub commits: String,
    pub timestamp: String,
}

impl From<&ActivityEvent> for ActivityRow {
    fn from(event: &ActivityEvent) -> Self {
        Self {
            kind: event.kind.label().to_string(),
            repo: event.repo.clone(),
            commits: event
                .commits
                .iter()
                .map(|message| format!("• {message}"))
                .collect::<Vec<_>>()
                .join("\n"),
            timestamp: format_timestamp(event.created_at),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
