//! Lookup failures and the messages shown for them.

pub const PROFILE_ERROR_MESSAGE: &str = "Error fetching user data. Please try again.";
pub const EVENTS_ERROR_MESSAGE: &str = "Unable to fetch events. Please try again.";
pub const EMPTY_USERNAME_PROMPT: &str = "Please enter a GitHub username!";

/// Errors raised by a lookup. `Display` is the fixed user-facing message;
/// the underlying cause stays in `source` for logging.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// Profile request failed or returned a non-success status
    #[error("{}", PROFILE_ERROR_MESSAGE)]
    ProfileNotFound {
        username: String,
        #[source]
        source: anyhow::Error,
    },

    /// Events request failed or returned a non-success status
    #[error("{}", EVENTS_ERROR_MESSAGE)]
    EventsUnavailable {
        username: String,
        #[source]
        source: anyhow::Error,
    },
}

impl LookupError {
    pub fn username(&self) -> &str {
        match self {
            Self::ProfileNotFound { username, .. } | Self::EventsUnavailable { username, .. } => {
                username
            }
        }
    }
}

/// Returned by a submission whose username is blank. Shown as a blocking
/// prompt rather than through the error banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{}", EMPTY_USERNAME_PROMPT)]
pub struct EmptyUsername;
