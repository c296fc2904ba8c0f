//! The lookup orchestrator.
//!
//! [`LookupController`] owns everything the window displays and performs the
//! synchronous state transitions. [`run_lookup`] is the async two-stage fetch
//! (profile, then events) that produces a [`LookupOutcome`] for the
//! controller to apply.
//!
//! A new submission cancels the previous one's token, and outcomes tagged
//! with an older generation are dropped on apply, so a slow response for a
//! previous username can never overwrite a newer one.

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::activity;
use crate::client::GitHubClient;
use crate::error::{EmptyUsername, LookupError};
use crate::models::{ActivityEvent, GitHubUser};

/// Everything the window renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupState {
    /// Username of the latest accepted submission.
    pub username: String,
    pub profile: Option<GitHubUser>,
    pub events: Vec<ActivityEvent>,
    pub error: Option<String>,
    pub loading: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupPhase {
    Idle,
    Loaded,
    Failed,
}

impl LookupState {
    pub fn phase(&self) -> LookupPhase {
        if self.profile.is_some() {
            LookupPhase::Loaded
        } else if self.error.is_some() {
            LookupPhase::Failed
        } else {
            LookupPhase::Idle
        }
    }
}

/// Handle for one accepted submission.
#[derive(Debug, Clone)]
pub struct Submission {
    pub generation: u64,
    pub username: String,
    pub cancel: CancellationToken,
}

#[derive(Debug)]
pub enum LookupOutcome {
    Loaded {
        profile: GitHubUser,
        events: Vec<ActivityEvent>,
    },
    /// The profile resolved but the events feed did not.
    EventsUnavailable {
        profile: GitHubUser,
        error: LookupError,
    },
    ProfileNotFound(LookupError),
    Cancelled,
}

impl LookupOutcome {
    /// The profile carried by this outcome, if any.
    pub fn profile(&self) -> Option<&GitHubUser> {
        match self {
            Self::Loaded { profile, .. } | Self::EventsUnavailable { profile, .. } => Some(profile),
            Self::ProfileNotFound(_) | Self::Cancelled => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct LookupController {
    state: LookupState,
    generation: u64,
    in_flight: Option<CancellationToken>,
}

impl LookupController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LookupState {
        &self.state
    }

    /// Whether `generation` belongs to the latest submission.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Accepts a new submission.
    ///
    /// A blank username is rejected without touching any state. Otherwise the
    /// error is cleared, any in-flight submission is cancelled, and a fresh
    /// [`Submission`] is returned for [`run_lookup`].
    pub fn submit(&mut self, username: &str) -> Result<Submission, EmptyUsername> {
        let username = username.trim();
        if username.is_empty() {
            return Err(EmptyUsername);
        }

        if let Some(previous) = self.in_flight.take() {
            previous.cancel();
        }

        self.generation += 1;
        let cancel = CancellationToken::new();
        self.in_flight = Some(cancel.clone());

        self.state.username = username.to_string();
        self.state.error = None;
        self.state.loading = true;

        Ok(Submission {
            generation: self.generation,
            username: username.to_string(),
            cancel,
        })
    }

    /// Applies the outcome of a submission. Returns `false` when the outcome
    /// was dropped because it is cancelled or a newer submission exists.
    pub fn apply(&mut self, generation: u64, outcome: LookupOutcome) -> bool {
        if !self.is_current(generation) {
            return false;
        }

        let (profile, events, error) = match outcome {
            LookupOutcome::Cancelled => return false,
            LookupOutcome::Loaded { profile, events } => (Some(profile), events, None),
            LookupOutcome::EventsUnavailable { profile, error } => {
                (Some(profile), Vec::new(), Some(error.to_string()))
            }
            LookupOutcome::ProfileNotFound(error) => (None, Vec::new(), Some(error.to_string())),
        };

        self.state.profile = profile;
        self.state.events = events;
        self.state.error = error;
        self.state.loading = false;
        true
    }
}

/// Runs the two-stage lookup for a submission: the events feed is requested
/// only once the profile has resolved. Yields [`LookupOutcome::Cancelled`] as
/// soon as the submission's token is cancelled.
pub async fn run_lookup(client: &GitHubClient, submission: &Submission) -> LookupOutcome {
    tokio::select! {
        biased;
        _ = submission.cancel.cancelled() => LookupOutcome::Cancelled,
        outcome = resolve(client, &submission.username) => outcome,
    }
}

async fn resolve(client: &GitHubClient, username: &str) -> LookupOutcome {
    let profile = match client.fetch_user(username).await {
        Ok(profile) => profile,
        Err(source) => {
            warn!(username, error = %format!("{source:#}"), "profile lookup failed");
            return LookupOutcome::ProfileNotFound(LookupError::ProfileNotFound {
                username: username.to_string(),
                source,
            });
        }
    };

    match client.fetch_events(username).await {
        Ok(feed) => {
            let events = activity::normalize(feed);
            info!(username, events = events.len(), "lookup complete");
            LookupOutcome::Loaded { profile, events }
        }
        Err(source) => {
            warn!(username, error = %format!("{source:#}"), "events lookup failed");
            LookupOutcome::EventsUnavailable {
                profile,
                error: LookupError::EventsUnavailable {
                    username: username.to_string(),
                    source,
                },
            }
        }
    }
}
