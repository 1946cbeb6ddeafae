use chrono::{DateTime, FixedOffset};

use crate::model::status::{Source, Status};

/// An inline tracking comment: when the task entered DOING and which syntax
/// started the clock. Serialized as `<!-- ts:<ISO-8601>|source:<tag> -->`.
/// Created on entry to DOING, stripped on completion; it must never survive
/// past the DOING state (see `ops::toggle::clean_line`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackingAnnotation {
    pub start_time: DateTime<FixedOffset>,
    pub source: Source,
}

/// A classified line. Exactly one variant applies; checkbox syntax takes
/// precedence over keyword syntax, and anything unrecognized is `Plain`
/// (blank lines are `Plain` with empty content), so classification is total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedLine {
    /// Native markdown checkbox: `- [ ] content` / `- [x] content`
    Checkbox {
        indent: String,
        marker: String,
        checked: bool,
        content: String,
    },
    /// Keyword status: `- DOING 10:32 <!-- ts:…|source:todo --> content`
    Keyword {
        indent: String,
        marker: String,
        status: Status,
        /// The `HH:MM` stamp shown next to the keyword, if any
        display_time: Option<String>,
        /// Tracking comment found in keyword position, if any
        annotation: Option<TrackingAnnotation>,
        content: String,
    },
    /// Bare list item: `- content`
    ListItem {
        indent: String,
        marker: String,
        content: String,
    },
    /// Not a list item at all (content may be empty for blank lines)
    Plain { indent: String, content: String },
}

impl ClassifiedLine {
    /// The keyword status, if this is a keyword line
    pub fn status(&self) -> Option<Status> {
        match self {
            ClassifiedLine::Keyword { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this line is currently in the DOING state
    pub fn is_doing(&self) -> bool {
        self.status() == Some(Status::Doing)
    }
}
