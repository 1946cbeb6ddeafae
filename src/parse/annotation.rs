use std::sync::LazyLock;

use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;

use crate::model::line::TrackingAnnotation;
use crate::model::status::Source;

/// Current format, keyword position: `DOING [HH:MM] <!-- ts:…|source:… -->`
static KEYWORD_POSITION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"DOING\s+(?:\d{2}:\d{2}\s+)?<!--\s*ts:([^|>]+)\|source:(\w+)\s*-->").unwrap()
});

/// Current format anywhere in the line (older layouts put it after content)
static SOURCED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--\s*ts:([^|>]+)\|source:(\w+)\s*-->").unwrap());

/// Legacy format without a source tag
static LEGACY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--\s*ts:([^>]+?)\s*-->").unwrap());

/// Any tracking comment, for stripping
static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*<!--\s*ts:[^>]*?-->").unwrap());

/// Serialize a tracking annotation as an inline comment. The timestamp is
/// stored in UTC with millisecond precision so it round-trips through
/// plain-text storage byte-for-byte.
pub fn encode(annotation: &TrackingAnnotation) -> String {
    format!(
        "<!-- ts:{}|source:{} -->",
        annotation
            .start_time
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true),
        annotation.source.tag()
    )
}

/// Extract the authoritative tracking annotation from a line, trying the
/// three historical comment layouts from most to least specific:
///
///   1. current format in keyword position (right after `DOING [HH:MM]`)
///   2. current format anywhere in the line
///   3. legacy `<!-- ts:… -->` with no source tag (source defaults to todo)
///
/// A comment whose timestamp does not parse, or whose source tag is unknown,
/// fails that pattern and the next one is tried. No match means no tracking
/// info — never an error.
pub fn decode(line: &str) -> Option<TrackingAnnotation> {
    for re in [&*KEYWORD_POSITION_RE, &*SOURCED_RE] {
        if let Some(caps) = re.captures(line)
            && let Ok(start_time) = DateTime::parse_from_rfc3339(caps[1].trim())
            && let Some(source) = Source::from_tag(caps[2].trim())
        {
            return Some(TrackingAnnotation { start_time, source });
        }
    }
    if let Some(caps) = LEGACY_RE.captures(line)
        && let Ok(start_time) = DateTime::parse_from_rfc3339(caps[1].trim())
    {
        return Some(TrackingAnnotation {
            start_time,
            source: Source::Todo,
        });
    }
    None
}

/// Remove every tracking comment from a line. The whitespace before each
/// comment goes with it, so stripping never squashes adjacent words.
pub fn strip(line: &str) -> String {
    COMMENT_RE.replace_all(line, "").into_owned()
}

/// Whether the line carries any tracking comment (well-formed or not)
pub fn contains_comment(line: &str) -> bool {
    COMMENT_RE.is_match(line)
}

/// Remove a trailing duration suffix (`… 5分钟`) from task content
pub fn strip_duration(content: &str) -> String {
    static DURATION_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\s+\d+(秒|分钟|小时)$").unwrap());
    DURATION_RE.replace(content, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn annotation(iso: &str, source: Source) -> TrackingAnnotation {
        TrackingAnnotation {
            start_time: DateTime::parse_from_rfc3339(iso).unwrap(),
            source,
        }
    }

    #[test]
    fn encode_is_utc_millis() {
        let a = annotation("2024-01-01T10:32:00.000Z", Source::Todo);
        assert_eq!(encode(&a), "<!-- ts:2024-01-01T10:32:00.000Z|source:todo -->");

        // Offset timestamps normalize to UTC on encode
        let a = annotation("2024-01-01T18:32:00+08:00", Source::Checkbox);
        assert_eq!(
            encode(&a),
            "<!-- ts:2024-01-01T10:32:00.000Z|source:checkbox -->"
        );
    }

    #[test]
    fn decode_keyword_position() {
        let line = "- DOING 10:32 <!-- ts:2024-01-01T10:32:00.000Z|source:checkbox --> write report";
        let a = decode(line).unwrap();
        assert_eq!(a.source, Source::Checkbox);
        assert_eq!(
            a.start_time,
            DateTime::parse_from_rfc3339("2024-01-01T10:32:00.000Z").unwrap()
        );
    }

    #[test]
    fn decode_keyword_position_without_display_time() {
        let line = "- DOING <!-- ts:2024-01-01T10:32:00.000Z|source:todo --> buy milk";
        assert_eq!(decode(line).unwrap().source, Source::Todo);
    }

    #[test]
    fn decode_after_content() {
        let line = "- DOING buy milk <!-- ts:2024-01-01T10:32:00.000Z|source:todo -->";
        let a = decode(line).unwrap();
        assert_eq!(a.source, Source::Todo);
    }

    #[test]
    fn decode_legacy_defaults_to_todo() {
        let line = "- DOING buy milk <!-- ts:2024-01-01T10:32:00.000Z -->";
        let a = decode(line).unwrap();
        assert_eq!(a.source, Source::Todo);
    }

    #[test]
    fn decode_prefers_sourced_over_legacy() {
        let line = "- DOING <!-- ts:2020-06-06T00:00:00.000Z --> task \
                    <!-- ts:2024-01-01T10:32:00.000Z|source:checkbox -->";
        let a = decode(line).unwrap();
        assert_eq!(a.source, Source::Checkbox);
        assert_eq!(
            a.start_time,
            DateTime::parse_from_rfc3339("2024-01-01T10:32:00.000Z").unwrap()
        );
    }

    #[test]
    fn decode_preserves_offset() {
        let line = "- DOING task <!-- ts:2024-01-01T18:32:00+08:00|source:todo -->";
        let a = decode(line).unwrap();
        assert_eq!(a.start_time.offset(), &FixedOffset::east_opt(8 * 3600).unwrap());
    }

    #[test]
    fn decode_malformed_timestamp_is_none() {
        assert_eq!(decode("- DOING task <!-- ts:not-a-time|source:todo -->"), None);
        assert_eq!(decode("- DOING task <!-- ts: -->"), None);
        assert_eq!(decode("- DOING task"), None);
    }

    #[test]
    fn decode_unknown_source_is_none() {
        // `ts:…|source:widget` fails the sourced patterns, and the legacy
        // pattern can't parse the pipe-joined capture either
        assert_eq!(
            decode("- DOING task <!-- ts:2024-01-01T10:32:00.000Z|source:widget -->"),
            None
        );
    }

    #[test]
    fn strip_removes_comment_and_leading_space() {
        assert_eq!(
            strip("- DOING 10:32 <!-- ts:2024-01-01T10:32:00.000Z|source:todo --> buy milk"),
            "- DOING 10:32 buy milk"
        );
        assert_eq!(
            strip("- DONE foo <!-- ts:2024-01-01T10:32:00.000Z|source:todo -->"),
            "- DONE foo"
        );
    }

    #[test]
    fn strip_does_not_squash_words() {
        assert_eq!(
            strip("- DONE foo <!-- ts:2024-01-01T10:32:00.000Z --> bar"),
            "- DONE foo bar"
        );
    }

    #[test]
    fn strip_removes_multiple_comments() {
        let line = "- a <!-- ts:x --> b <!-- ts:y --> c";
        assert_eq!(strip(line), "- a b c");
    }

    #[test]
    fn encode_decode_round_trip() {
        let a = annotation("2024-03-15T08:00:30.250Z", Source::Checkbox);
        let line = format!("- DOING 08:00 {} task", encode(&a));
        assert_eq!(decode(&line), Some(a));
    }

    #[test]
    fn strip_duration_trailing_only() {
        assert_eq!(strip_duration("buy milk 5分钟"), "buy milk");
        assert_eq!(strip_duration("buy milk 30秒"), "buy milk");
        assert_eq!(strip_duration("buy milk 2小时"), "buy milk");
        // Mid-content durations are content, not a suffix
        assert_eq!(strip_duration("wait 5分钟 then go"), "wait 5分钟 then go");
        assert_eq!(strip_duration("buy milk"), "buy milk");
    }
}
