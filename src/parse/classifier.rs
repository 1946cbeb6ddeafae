use std::sync::LazyLock;

use regex::Regex;

use crate::model::line::ClassifiedLine;
use crate::model::status::Status;
use crate::parse::annotation;

/// Native checkbox: `- [ ] content` / `3. [x] content`
static CHECKBOX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)([-*+]|\d+\.)\s+\[([ xX])\]\s+(.*)$").unwrap());

/// Keyword status with optional display time and tracking comment
static KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\s*)([-*+]|\d+\.)\s+(TODO|DOING|LATER|NOW|DONE|CANCELED)(?:[ \t]+(\d{2}:\d{2}))?(?:[ \t]*(<!--\s*ts:[^>]*?-->))?(?:[ \t]+(.*))?$",
    )
    .unwrap()
});

/// Bare list item
static LIST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)([-*+]|\d+\.)\s+(.*)$").unwrap());

/// Classify a single line. Total: every line lands in exactly one variant,
/// with checkbox syntax taking precedence over keyword syntax. The tracking
/// annotation is decoded tolerantly from anywhere in the line, so keyword
/// lines with a comment left in the legacy (after-content) position still
/// classify with their annotation attached.
pub fn classify(line: &str) -> ClassifiedLine {
    if let Some(caps) = CHECKBOX_RE.captures(line) {
        return ClassifiedLine::Checkbox {
            indent: caps[1].to_string(),
            marker: caps[2].to_string(),
            checked: &caps[3] != " ",
            content: caps[4].to_string(),
        };
    }

    if let Some(caps) = KEYWORD_RE.captures(line) {
        // from_keyword cannot fail here: the regex alternation is the
        // keyword vocabulary
        let status = Status::from_keyword(&caps[3]).unwrap_or(Status::Todo);
        return ClassifiedLine::Keyword {
            indent: caps[1].to_string(),
            marker: caps[2].to_string(),
            status,
            display_time: caps.get(4).map(|m| m.as_str().to_string()),
            annotation: annotation::decode(line),
            content: caps.get(6).map(|m| m.as_str()).unwrap_or("").to_string(),
        };
    }

    if let Some(caps) = LIST_RE.captures(line) {
        return ClassifiedLine::ListItem {
            indent: caps[1].to_string(),
            marker: caps[2].to_string(),
            content: caps[3].to_string(),
        };
    }

    let indent: String = line.chars().take_while(|c| c.is_whitespace()).collect();
    ClassifiedLine::Plain {
        indent,
        content: line.trim().to_string(),
    }
}

/// Split a leading `HH:MM` stamp off task content. Used when a task enters
/// DOING: an existing stamp is a stale creation-time marker, not the start
/// time, and gets replaced.
pub fn split_leading_display_time(content: &str) -> (Option<&str>, &str) {
    static LEADING_TIME_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^(\d{2}:\d{2})\s+(.*)$").unwrap());
    match LEADING_TIME_RE.captures(content) {
        Some(caps) => {
            let stamp = caps.get(1).unwrap().as_str();
            let rest = caps.get(2).unwrap().as_str();
            (Some(stamp), rest)
        }
        None => (None, content),
    }
}
