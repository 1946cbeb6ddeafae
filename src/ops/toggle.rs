use chrono::{DateTime, FixedOffset, Utc};

use crate::model::line::{ClassifiedLine, TrackingAnnotation};
use crate::model::settings::{DurationPosition, Settings};
use crate::model::status::{Source, Status};
use crate::parse::annotation;
use crate::parse::{classify, split_leading_display_time};
use crate::util::duration::{format_display_time, format_duration};

/// What a toggle did to the line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Plain text or bare list item became a TODO item
    MarkedTodo,
    /// TODO/LATER/NOW or an unchecked checkbox entered DOING
    Started { source: Source },
    /// DOING completed to DONE or `[x]`; duration is present only when a
    /// tracking annotation was found
    Completed {
        source: Source,
        duration_secs: Option<i64>,
    },
    /// DONE/CANCELED or a checked checkbox reverted to a bare list item
    Cleared,
}

/// Result of one toggle invocation. `line` is always produced: toggling is
/// total, there is no failure case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub line: String,
    pub transition: Transition,
}

/// Advance a line one step through the task lifecycle:
///
///   plain / list item → TODO → DOING → DONE (or `[x]`) → list item
///
/// Pure: the wall clock is passed in by the host and read nowhere else.
/// Classification for every branch except DOING runs on the line with stray
/// tracking comments stripped (editing mistakes must not leak a comment into
/// the next state); the DOING branch reads the raw line because the comment
/// is exactly what it consumes.
pub fn toggle_line(line: &str, settings: &Settings, now: DateTime<FixedOffset>) -> ToggleOutcome {
    let cleaned = annotation::strip(line);

    let raw = classify(line);
    let classified = if raw.is_doing() { raw } else { classify(&cleaned) };

    match classified {
        ClassifiedLine::Checkbox {
            indent,
            marker,
            checked: false,
            content,
        } => start_tracking(&indent, &marker, &content, Source::Checkbox, now),

        ClassifiedLine::Checkbox {
            indent,
            marker,
            checked: true,
            content,
        } => {
            let content = annotation::strip_duration(&content);
            let content = content.trim();
            let line = if content.is_empty() {
                format!("{}{} ", indent, marker)
            } else {
                format!("{}{} {}", indent, marker, content)
            };
            ToggleOutcome {
                line,
                transition: Transition::Cleared,
            }
        }

        ClassifiedLine::Keyword {
            indent,
            marker,
            status: Status::Todo | Status::Later | Status::Now,
            content,
            ..
        } => start_tracking(&indent, &marker, &content, Source::Todo, now),

        ClassifiedLine::Keyword {
            indent,
            marker,
            status: Status::Doing,
            display_time,
            annotation,
            content,
        } => complete(
            &indent,
            &marker,
            display_time.as_deref(),
            annotation,
            &content,
            settings,
            now,
        ),

        ClassifiedLine::Keyword {
            indent,
            marker,
            status: Status::Done | Status::Canceled,
            content,
            ..
        } => {
            let content = annotation::strip_duration(&content);
            let content = content.trim();
            let line = if content.is_empty() {
                format!("{}{} ", indent, marker)
            } else {
                format!("{}{} {}", indent, marker, content)
            };
            ToggleOutcome {
                line,
                transition: Transition::Cleared,
            }
        }

        ClassifiedLine::ListItem {
            indent,
            marker,
            content,
        } => {
            let line = if content.trim().is_empty() {
                format!("{}{} TODO ", indent, marker)
            } else {
                format!("{}{} TODO {}", indent, marker, content)
            };
            ToggleOutcome {
                line,
                transition: Transition::MarkedTodo,
            }
        }

        ClassifiedLine::Plain { indent, content } => {
            let line = if content.is_empty() {
                format!("{}- TODO ", indent)
            } else {
                format!("{}- TODO {}", indent, content)
            };
            ToggleOutcome {
                line,
                transition: Transition::MarkedTodo,
            }
        }
    }
}

/// Enter DOING: stamp the start time and embed the tracking annotation.
/// A leading `HH:MM` already in the content is a stale creation-time stamp
/// and is replaced by the new start time.
fn start_tracking(
    indent: &str,
    marker: &str,
    content: &str,
    source: Source,
    now: DateTime<FixedOffset>,
) -> ToggleOutcome {
    let (_, content) = split_leading_display_time(content);
    let annotation = TrackingAnnotation {
        start_time: now,
        source,
    };
    let comment = annotation::encode(&annotation);
    let display = format_display_time(now);

    let line = if content.trim().is_empty() {
        format!("{}{} DOING {} {}", indent, marker, display, comment)
    } else {
        format!("{}{} DOING {} {} {}", indent, marker, display, comment, content)
    };
    ToggleOutcome {
        line,
        transition: Transition::Started { source },
    }
}

/// Leave DOING. With a tracking annotation the elapsed time is computed and
/// the line reverts to the syntax that started tracking (`[x]` for checkbox,
/// `DONE` for keyword); without one, completion is un-timed.
fn complete(
    indent: &str,
    marker: &str,
    display_time: Option<&str>,
    annotation: Option<TrackingAnnotation>,
    content: &str,
    settings: &Settings,
    now: DateTime<FixedOffset>,
) -> ToggleOutcome {
    // The comment may still sit inside the content capture (legacy position)
    let content = annotation::strip(content);
    let content = content.trim();

    let Some(annotation) = annotation else {
        let line = if content.is_empty() {
            format!("{}{} DONE", indent, marker)
        } else {
            format!("{}{} DONE {}", indent, marker, content)
        };
        return ToggleOutcome {
            line,
            transition: Transition::Completed {
                source: Source::Todo,
                duration_secs: None,
            },
        };
    };

    let elapsed = now
        .with_timezone(&Utc)
        .signed_duration_since(annotation.start_time.with_timezone(&Utc))
        .num_seconds()
        .max(0);
    let duration = format_duration(elapsed);

    let line = match annotation.source {
        Source::Checkbox => {
            let mut parts = vec![format!("{}{} [x]", indent, marker)];
            if content.is_empty() {
                // Bare checked box; nothing to hang a duration on
                parts.push(String::new());
            } else {
                if let Some(d) = display_time {
                    parts.push(d.to_string());
                }
                parts.push(content.to_string());
                if settings.auto_append_duration {
                    parts.push(duration);
                }
            }
            parts.join(" ")
        }
        Source::Todo => {
            let mut parts = vec![format!("{}{} DONE", indent, marker)];
            if let Some(d) = display_time {
                parts.push(d.to_string());
            }
            match (settings.auto_append_duration, content.is_empty()) {
                (true, false) => match settings.duration_position {
                    DurationPosition::End => {
                        parts.push(content.to_string());
                        parts.push(duration);
                    }
                    DurationPosition::AfterStatus => {
                        parts.push(duration);
                        parts.push(content.to_string());
                    }
                },
                (true, true) => parts.push(duration),
                (false, false) => parts.push(content.to_string()),
                (false, true) => {}
            }
            parts.join(" ")
        }
    };

    ToggleOutcome {
        line,
        transition: Transition::Completed {
            source: annotation.source,
            duration_secs: Some(elapsed),
        },
    }
}

/// Repair a line that carries a tracking comment without being in DOING
/// (left over from a failed transition or a manual edit). Returns the
/// stripped line, or `None` when there is nothing to repair.
pub fn clean_line(line: &str) -> Option<String> {
    if annotation::decode(line).is_none() {
        return None;
    }
    if classify(line).is_doing() {
        return None;
    }
    Some(annotation::strip(line))
}
