//! Read-only view of keyword task lines.
//!
//! The renderer never mutates text: it classifies a line and produces a small
//! tree of immutable value fragments for the host to display. Recomputation
//! is side-effect-free and idempotent, so the host may call it on every
//! change trigger (text edited, viewport moved, selection changed) without a
//! caching layer.

use crate::model::line::ClassifiedLine;
use crate::model::settings::Settings;
use crate::model::status::Status;
use crate::parse::{annotation, classify};

/// One visual piece of a rendered line. Behavior differs only in the
/// produced fragment, so these are plain values dispatched on their tag —
/// no widget hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// The checkbox shown in place of the status keyword
    Checkbox { checked: bool },
    /// Status badge, shown for the in-flight statuses
    Badge { status: Status },
    /// The task text, tracking comment hidden
    Content { text: String, strikethrough: bool },
}

/// A keyword line ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub status: Status,
    pub css_class: &'static str,
    pub fragments: Vec<Fragment>,
}

impl RenderedLine {
    /// Plain-text projection of the fragments, for terminal output
    pub fn to_plain_text(&self) -> String {
        let mut parts = Vec::new();
        for fragment in &self.fragments {
            match fragment {
                Fragment::Checkbox { checked } => {
                    parts.push(if *checked { "[x]".to_string() } else { "[ ]".to_string() });
                }
                Fragment::Badge { status } => parts.push(format!("({})", status.keyword())),
                Fragment::Content { text, strikethrough } => {
                    if *strikethrough {
                        parts.push(format!("~~{}~~", text));
                    } else {
                        parts.push(text.clone());
                    }
                }
            }
        }
        parts.join(" ")
    }
}

/// Render a single line, or `None` when it is not a keyword task line.
/// Native checkbox lines are left to the host's own markdown rendering.
pub fn render_line(line: &str, settings: &Settings) -> Option<RenderedLine> {
    let ClassifiedLine::Keyword {
        status,
        display_time,
        content,
        ..
    } = classify(line)
    else {
        return None;
    };

    let mut fragments = vec![Fragment::Checkbox {
        checked: status.is_completed(),
    }];

    if settings.show_status_label && status != Status::Todo && status != Status::Done {
        fragments.push(Fragment::Badge { status });
    }

    let stripped = annotation::strip(&content).trim().to_string();
    let text = match display_time {
        Some(stamp) if stripped.is_empty() => stamp,
        Some(stamp) => format!("{} {}", stamp, stripped),
        None => stripped,
    };
    fragments.push(Fragment::Content {
        strikethrough: settings.enable_strikethrough && status.is_completed(),
        text,
    });

    Some(RenderedLine {
        status,
        css_class: status.css_class(),
        fragments,
    })
}
