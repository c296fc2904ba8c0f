//! Look up a GitHub user's profile and recent push / pull request activity.

pub mod activity;
pub mod avatar;
pub mod client;
pub mod config;
pub mod error;
pub mod lookup;
pub mod models;
pub mod telemetry;
pub mod view;

pub use client::GitHubClient;
pub use config::Config;
pub use error::{EmptyUsername, LookupError};
pub use lookup::{run_lookup, LookupController, LookupOutcome, LookupPhase, LookupState, Submission};
pub use models::{ActivityEvent, ActivityKind, GitHubUser};
