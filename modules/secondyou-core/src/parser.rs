//! Ordered span extraction over literal section markers.
//!
//! A response either yields all four sections from its markers, or none of
//! them: any empty section discards the marker results and the raw text is
//! split into thirds instead. The two are never mixed.

use thiserror::Error;
use tracing::warn;

use secondyou_common::PathNarrative;

pub const YEAR_1_MARKER: &str = "**YEAR_1:**";
pub const YEAR_3_MARKER: &str = "**YEAR_3:**";
pub const YEAR_10_MARKER: &str = "**YEAR_10:**";
pub const FUTURE_MESSAGE_MARKER: &str = "**FUTURE_MESSAGE:**";

/// Closing line used whenever the marker structure could not be recovered.
pub const FALLBACK_FUTURE_MESSAGE: &str =
    "Here's what I'd tell you now: Trust your instincts and embrace the journey ahead.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("response text is empty")]
    EmptyInput,
}

/// Parse a model response into a narrative, falling back to an even split.
pub fn parse_narrative(raw: &str) -> Result<PathNarrative, ParseError> {
    if raw.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }

    match extract_sections(raw) {
        Some(narrative) => Ok(narrative),
        None => {
            warn!(len = raw.len(), "Response missing section markers, using fallback split");
            Ok(fallback_split(raw))
        }
    }
}

/// Marker path. `None` when any of the four sections comes out empty.
fn extract_sections(raw: &str) -> Option<PathNarrative> {
    let year1 = section_between(raw, YEAR_1_MARKER, Some(YEAR_3_MARKER));
    let year3 = section_between(raw, YEAR_3_MARKER, Some(YEAR_10_MARKER));
    let year10 = section_between(raw, YEAR_10_MARKER, Some(FUTURE_MESSAGE_MARKER));
    let future_message = strip_quotes(section_between(raw, FUTURE_MESSAGE_MARKER, None));

    if [year1, year3, year10, future_message]
        .iter()
        .any(|s| s.is_empty())
    {
        return None;
    }

    Some(PathNarrative {
        year1: year1.to_string(),
        year3: year3.to_string(),
        year10: year10.to_string(),
        future_message: future_message.to_string(),
    })
}

/// Text after the first occurrence of `start`, up to the first `end` marker
/// that follows it (or end of text), trimmed. Empty when `start` is absent.
fn section_between<'a>(raw: &'a str, start: &str, end: Option<&str>) -> &'a str {
    let Some(pos) = raw.find(start) else {
        return "";
    };
    let body = &raw[pos + start.len()..];
    let body = match end.and_then(|e| body.find(e)) {
        Some(stop) => &body[..stop],
        None => body,
    };
    body.trim()
}

/// Drop one leading and one trailing double quote.
fn strip_quotes(s: &str) -> &str {
    let s = s.strip_prefix('"').unwrap_or(s);
    s.strip_suffix('"').unwrap_or(s)
}

/// Degraded path: three contiguous thirds by character count.
fn fallback_split(raw: &str) -> PathNarrative {
    let chars: Vec<char> = raw.chars().collect();
    let n = chars.len();

    // Too short to give every third a character.
    if n < 3 {
        return PathNarrative {
            year1: raw.to_string(),
            year3: raw.to_string(),
            year10: raw.to_string(),
            future_message: FALLBACK_FUTURE_MESSAGE.to_string(),
        };
    }

    let first = n / 3;
    let second = 2 * n / 3;
    PathNarrative {
        year1: chars[..first].iter().collect(),
        year3: chars[first..second].iter().collect(),
        year10: chars[second..].iter().collect(),
        future_message: FALLBACK_FUTURE_MESSAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn well_formed() -> String {
        format!(
            "Intro line the model added.\n\n{YEAR_1_MARKER}\n  The first year was hard.  \n\n\
             {YEAR_3_MARKER}\nBy year three I had a studio.\n\n\
             {YEAR_10_MARKER}\nTen years on, I teach.\n\n\
             {FUTURE_MESSAGE_MARKER}\n\"Here's what I'd tell you now: start sooner.\"\n"
        )
    }

    #[test]
    fn recovers_all_four_sections() {
        let narrative = parse_narrative(&well_formed()).unwrap();
        assert_eq!(narrative.year1, "The first year was hard.");
        assert_eq!(narrative.year3, "By year three I had a studio.");
        assert_eq!(narrative.year10, "Ten years on, I teach.");
        assert_eq!(
            narrative.future_message,
            "Here's what I'd tell you now: start sooner."
        );
    }

    #[test]
    fn strips_only_one_quote_each_side() {
        let raw = format!(
            "{YEAR_1_MARKER} a {YEAR_3_MARKER} b {YEAR_10_MARKER} c \
             {FUTURE_MESSAGE_MARKER} \"\"quoted\"\""
        );
        let narrative = parse_narrative(&raw).unwrap();
        assert_eq!(narrative.future_message, "\"quoted\"");
    }

    #[test]
    fn unquoted_future_message_is_kept() {
        let raw = format!(
            "{YEAR_1_MARKER} a {YEAR_3_MARKER} b {YEAR_10_MARKER} c \
             {FUTURE_MESSAGE_MARKER} keep going"
        );
        assert_eq!(parse_narrative(&raw).unwrap().future_message, "keep going");
    }

    #[test]
    fn no_markers_falls_back_to_thirds() {
        let raw = "abcdefghijkl";
        let narrative = parse_narrative(raw).unwrap();
        assert_eq!(narrative.year1, "abcd");
        assert_eq!(narrative.year3, "efgh");
        assert_eq!(narrative.year10, "ijkl");
        assert_eq!(narrative.future_message, FALLBACK_FUTURE_MESSAGE);
    }

    #[test]
    fn fallback_thirds_cover_the_whole_text() {
        let raw = "A life story without any structure at all, ünïcödé included.";
        let narrative = parse_narrative(raw).unwrap();
        assert!(!narrative.year1.is_empty());
        assert!(!narrative.year3.is_empty());
        assert!(!narrative.year10.is_empty());
        let joined = format!("{}{}{}", narrative.year1, narrative.year3, narrative.year10);
        assert_eq!(joined, raw);
    }

    #[test]
    fn one_empty_section_discards_all_marker_results() {
        let raw = format!(
            "{YEAR_1_MARKER} first {YEAR_3_MARKER} third {YEAR_10_MARKER}   \
             {FUTURE_MESSAGE_MARKER} bye"
        );
        let narrative = parse_narrative(&raw).unwrap();
        assert_eq!(narrative.future_message, FALLBACK_FUTURE_MESSAGE);
        assert_ne!(narrative.year1, "first");
        assert_eq!(
            format!("{}{}{}", narrative.year1, narrative.year3, narrative.year10),
            raw
        );
    }

    #[test]
    fn missing_future_message_marker_falls_back() {
        let raw = format!("{YEAR_1_MARKER} a {YEAR_3_MARKER} b {YEAR_10_MARKER} c");
        let narrative = parse_narrative(&raw).unwrap();
        assert_eq!(narrative.future_message, FALLBACK_FUTURE_MESSAGE);
    }

    #[test]
    fn tiny_text_fills_every_field() {
        let narrative = parse_narrative("ok").unwrap();
        assert_eq!(narrative.year1, "ok");
        assert_eq!(narrative.year10, "ok");
    }

    #[test]
    fn empty_input_is_an_error() {
        assert_eq!(parse_narrative(""), Err(ParseError::EmptyInput));
        assert_eq!(parse_narrative("  \n\t "), Err(ParseError::EmptyInput));
    }

    #[test]
    fn parsing_is_idempotent() {
        let raw = well_formed();
        assert_eq!(parse_narrative(&raw), parse_narrative(&raw));
        assert_eq!(parse_narrative("no markers here"), parse_narrative("no markers here"));
    }
}
