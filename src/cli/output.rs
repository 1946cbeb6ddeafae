use serde::Serialize;

use crate::model::line::{ClassifiedLine, TrackingAnnotation};
use crate::model::status::{Source, Status};
use crate::ops::toggle::Transition;
use crate::render::{Fragment, RenderedLine};
use crate::util::duration::format_duration;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ToggleJson {
    pub file: String,
    pub line: usize,
    pub before: String,
    pub after: String,
    pub transition: TransitionJson,
}

#[derive(Serialize)]
pub struct TransitionJson {
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

#[derive(Serialize)]
pub struct CleanJson {
    pub file: String,
    pub line: usize,
    pub cleaned: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

#[derive(Serialize)]
pub struct StatusJson {
    pub line: usize,
    pub text: String,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<AnnotationJson>,
}

#[derive(Serialize)]
pub struct AnnotationJson {
    pub start_time: String,
    pub source: Source,
}

#[derive(Serialize)]
pub struct RenderLineJson {
    pub line: usize,
    pub status: Status,
    pub css_class: &'static str,
    pub checked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<&'static str>,
    pub content: String,
    pub strikethrough: bool,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn transition_to_json(transition: &Transition) -> TransitionJson {
    match transition {
        Transition::MarkedTodo => TransitionJson {
            kind: "marked_todo",
            source: None,
            duration_secs: None,
            duration: None,
        },
        Transition::Started { source } => TransitionJson {
            kind: "started",
            source: Some(*source),
            duration_secs: None,
            duration: None,
        },
        Transition::Completed {
            source,
            duration_secs,
        } => TransitionJson {
            kind: "completed",
            source: Some(*source),
            duration_secs: *duration_secs,
            duration: duration_secs.map(format_duration),
        },
        Transition::Cleared => TransitionJson {
            kind: "cleared",
            source: None,
            duration_secs: None,
            duration: None,
        },
    }
}

fn annotation_to_json(annotation: &TrackingAnnotation) -> AnnotationJson {
    AnnotationJson {
        start_time: annotation.start_time.to_rfc3339(),
        source: annotation.source,
    }
}

pub fn classified_to_json(line_number: usize, text: &str, classified: &ClassifiedLine) -> StatusJson {
    match classified {
        ClassifiedLine::Checkbox {
            checked, content, ..
        } => StatusJson {
            line: line_number,
            text: text.to_string(),
            kind: "checkbox",
            status: None,
            checked: Some(*checked),
            content: content.clone(),
            display_time: None,
            annotation: None,
        },
        ClassifiedLine::Keyword {
            status,
            display_time,
            annotation,
            content,
            ..
        } => StatusJson {
            line: line_number,
            text: text.to_string(),
            kind: "keyword",
            status: Some(*status),
            checked: None,
            content: content.clone(),
            display_time: display_time.clone(),
            annotation: annotation.as_ref().map(annotation_to_json),
        },
        ClassifiedLine::ListItem { content, .. } => StatusJson {
            line: line_number,
            text: text.to_string(),
            kind: "list_item",
            status: None,
            checked: None,
            content: content.clone(),
            display_time: None,
            annotation: None,
        },
        ClassifiedLine::Plain { content, .. } => StatusJson {
            line: line_number,
            text: text.to_string(),
            kind: "plain",
            status: None,
            checked: None,
            content: content.clone(),
            display_time: None,
            annotation: None,
        },
    }
}

pub fn rendered_to_json(line_number: usize, rendered: &RenderedLine) -> RenderLineJson {
    let mut checked = false;
    let mut badge = None;
    let mut content = String::new();
    let mut strikethrough = false;

    for fragment in &rendered.fragments {
        match fragment {
            Fragment::Checkbox { checked: c } => checked = *c,
            Fragment::Badge { status } => badge = Some(status.keyword()),
            Fragment::Content {
                text,
                strikethrough: s,
            } => {
                content = text.clone();
                strikethrough = *s;
            }
        }
    }

    RenderLineJson {
        line: line_number,
        status: rendered.status,
        css_class: rendered.css_class,
        checked,
        badge,
        content,
        strikethrough,
    }
}
