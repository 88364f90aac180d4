// logtrim - core/matcher.rs
//
// Timestamp span detection over a block of text.
// Core layer: pure logic, no I/O or environment access.

use crate::util::constants;
use crate::util::error::PatternError;
use regex::Regex;

/// A half-open byte range `[start, end)` within a block's text that matched
/// the timestamp pattern.
///
/// Spans produced for one block are sorted by `start` and never overlap;
/// both properties follow from the single left-to-right regex scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Length of the matched text in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A compiled timestamp pattern.
///
/// Compiled once at startup and shared by every pass; never recompiled per
/// line or block. The pattern is an alternation whose earlier branches win
/// when two alternatives could match at the same position (the regex crate's
/// leftmost-first semantics).
#[derive(Debug, Clone)]
pub struct TimestampMatcher {
    pattern: Regex,
}

impl TimestampMatcher {
    /// Compile a caller-supplied pattern.
    ///
    /// Fails fast on an invalid or oversized pattern so misconfiguration is
    /// reported before any text is processed.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        if pattern.len() > constants::MAX_REGEX_PATTERN_LENGTH {
            return Err(PatternError::TooLong {
                length: pattern.len(),
                max_length: constants::MAX_REGEX_PATTERN_LENGTH,
            });
        }
        let compiled = Regex::new(pattern).map_err(|e| PatternError::Invalid {
            pattern: pattern.to_string(),
            source: e,
        })?;
        Ok(Self { pattern: compiled })
    }

    /// The source text of the compiled pattern.
    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }

    /// Find every timestamp-like substring in `text`, in occurrence order.
    pub fn find_spans(&self, text: &str) -> Vec<Span> {
        self.pattern
            .find_iter(text)
            .map(|m| Span {
                start: m.start(),
                end: m.end(),
            })
            .collect()
    }
}

impl Default for TimestampMatcher {
    /// The built-in alternation covering ISO, abbreviated-month, bare-time,
    /// duration, and syslog forms.
    fn default() -> Self {
        // The built-in pattern is covered by the unit tests below, so any
        // mistake shows up as a failing test rather than a runtime panic.
        Self::new(constants::DEFAULT_TIMESTAMP_PATTERN)
            .expect("built-in timestamp pattern must compile")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans_of(line: &str) -> Vec<(usize, usize)> {
        TimestampMatcher::default()
            .find_spans(line)
            .iter()
            .map(|s| (s.start, s.end))
            .collect()
    }

    #[test]
    fn test_iso_date_time_with_space() {
        let line = "2025-09-24 18:41:09 some log message";
        let spans = spans_of(line);
        assert_eq!(spans.len(), 1);
        assert_eq!(&line[spans[0].0..spans[0].1], "2025-09-24 18:41:09");
    }

    #[test]
    fn test_iso_date_time_with_t_and_zulu() {
        let line = r#"{"time":"2025-09-25T04:36:33Z","msg":"foo"}"#;
        let spans = spans_of(line);
        assert_eq!(spans.len(), 1);
        assert_eq!(&line[spans[0].0..spans[0].1], "2025-09-25T04:36:33Z");
    }

    #[test]
    fn test_iso_fractional_seconds_and_offset() {
        let line = "at 2025-09-24T18:41:09.123456+02:00 worker started";
        let spans = spans_of(line);
        assert_eq!(spans.len(), 1);
        assert_eq!(
            &line[spans[0].0..spans[0].1],
            "2025-09-24T18:41:09.123456+02:00"
        );
    }

    /// A bare date never matches: the ISO branch requires the time component.
    #[test]
    fn test_bare_date_is_not_a_timestamp() {
        assert!(spans_of("released on 2025-09-24 by the team").is_empty());
    }

    #[test]
    fn test_abbreviated_month() {
        let line = "2025-Sep-24 18:41:09.830218 boot sequence";
        let spans = spans_of(line);
        assert_eq!(spans.len(), 1);
        assert_eq!(
            &line[spans[0].0..spans[0].1],
            "2025-Sep-24 18:41:09.830218"
        );
    }

    #[test]
    fn test_bare_time() {
        let line = "up since 18:41:09 today";
        let spans = spans_of(line);
        assert_eq!(spans.len(), 1);
        assert_eq!(&line[spans[0].0..spans[0].1], "18:41:09");
    }

    #[test]
    fn test_durations() {
        let line = "retry in 10m5s, then 30m, then 45s";
        let spans = spans_of(line);
        let matched: Vec<&str> = spans.iter().map(|&(s, e)| &line[s..e]).collect();
        assert_eq!(matched, vec!["10m5s", "30m", "45s"]);
    }

    #[test]
    fn test_syslog_date() {
        let line = "boot: Wed Sep 24 18:41:09 2025 kernel ready";
        let spans = spans_of(line);
        assert_eq!(spans.len(), 1);
        assert_eq!(&line[spans[0].0..spans[0].1], "Wed Sep 24 18:41:09 2025");
    }

    #[test]
    fn test_multiple_spans_in_order() {
        let line = "Start 2025-09-24T18:41:09Z end 2025-09-24T19:00:00Z";
        let matcher = TimestampMatcher::default();
        let spans = matcher.find_spans(line);
        assert_eq!(spans.len(), 2);
        assert!(spans[0].start < spans[1].start, "spans must be ordered");
        assert!(spans[0].end <= spans[1].start, "spans must not overlap");
    }

    #[test]
    fn test_no_match() {
        assert!(spans_of("no timestamp here").is_empty());
        assert!(spans_of("").is_empty());
    }

    /// The ISO branch wins over the bare-time branch at the same position
    /// by consuming from the earlier (leftmost) start.
    #[test]
    fn test_iso_takes_whole_match_over_bare_time() {
        let line = "2025-09-24 18:41:09 tick";
        let spans = spans_of(line);
        assert_eq!(spans.len(), 1, "date and time must match as one span");
    }

    #[test]
    fn test_custom_pattern() {
        let matcher = TimestampMatcher::new(r"ts=\d+").unwrap();
        let line = "ts=1705329022 event fired ts=1705329023";
        let spans = matcher.find_spans(line);
        assert_eq!(spans.len(), 2);
        assert_eq!(&line[spans[0].start..spans[0].end], "ts=1705329022");
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let result = TimestampMatcher::new("[unclosed");
        assert!(matches!(result, Err(PatternError::Invalid { .. })));
    }

    #[test]
    fn test_oversized_pattern_is_rejected() {
        let huge = "a".repeat(constants::MAX_REGEX_PATTERN_LENGTH + 1);
        let result = TimestampMatcher::new(&huge);
        assert!(matches!(result, Err(PatternError::TooLong { .. })));
    }
}
