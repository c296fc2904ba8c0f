use chrono::{DateTime, Utc};

use crate::models::{ActivityEvent, ActivityKind, RawEvent};

/// Filters a raw events feed down to push and pull request events.
///
/// Feed order is preserved. Commit messages are copied in payload order for
/// push events only.
pub fn normalize(feed: Vec<RawEvent>) -> Vec<ActivityEvent> {
    feed.into_iter()
        .filter_map(|event| {
            let kind = ActivityKind::from_event_type(&event.kind)?;
            let commits = match kind {
                ActivityKind::Push => event
                    .payload
                    .map(|payload| payload.commits.into_iter().map(|c| c.message).collect())
                    .unwrap_or_default(),
                ActivityKind::PullRequest => Vec::new(),
            };

            Some(ActivityEvent {
                kind,
                repo: event.repo.name,
                created_at: event.created_at,
                commits,
            })
        })
        .collect()
}

/// Formats an event timestamp for display, e.g. `Mar 5, 2024 14:07 UTC`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%b %-d, %Y %H:%M UTC").to_string()
}
