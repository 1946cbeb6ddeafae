use serde::{Deserialize, Serialize};

/// Task status keyword on a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Todo,
    Doing,
    Later,
    Now,
    Done,
    Canceled,
}

impl Status {
    /// The keyword as it appears in the line text
    pub fn keyword(self) -> &'static str {
        match self {
            Status::Todo => "TODO",
            Status::Doing => "DOING",
            Status::Later => "LATER",
            Status::Now => "NOW",
            Status::Done => "DONE",
            Status::Canceled => "CANCELED",
        }
    }

    /// Parse a keyword into a status
    pub fn from_keyword(s: &str) -> Option<Status> {
        match s {
            "TODO" => Some(Status::Todo),
            "DOING" => Some(Status::Doing),
            "LATER" => Some(Status::Later),
            "NOW" => Some(Status::Now),
            "DONE" => Some(Status::Done),
            "CANCELED" => Some(Status::Canceled),
            _ => None,
        }
    }

    /// Whether this status counts as completed (checkbox renders checked)
    pub fn is_completed(self) -> bool {
        matches!(self, Status::Done | Status::Canceled)
    }

    /// Stable style-class name for the rendering path
    pub fn css_class(self) -> &'static str {
        match self {
            Status::Todo => "stint-status-todo",
            Status::Doing => "stint-status-doing",
            Status::Later => "stint-status-later",
            Status::Now => "stint-status-now",
            Status::Done => "stint-status-done",
            Status::Canceled => "stint-status-canceled",
        }
    }
}

/// Which syntax started time tracking. Determines the completion syntax:
/// `Todo` completes back to a `DONE` keyword line, `Checkbox` back to `[x]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Todo,
    Checkbox,
}

impl Source {
    /// The tag as it appears in the tracking comment
    pub fn tag(self) -> &'static str {
        match self {
            Source::Todo => "todo",
            Source::Checkbox => "checkbox",
        }
    }

    pub fn from_tag(s: &str) -> Option<Source> {
        match s {
            "todo" => Some(Source::Todo),
            "checkbox" => Some(Source::Checkbox),
            _ => None,
        }
    }
}
