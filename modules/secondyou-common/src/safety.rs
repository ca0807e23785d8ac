use regex::Regex;
use std::sync::LazyLock;

/// Topic family a screened pattern belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenCategory {
    SelfHarmOrViolence,
    IllegalActivity,
    SexualContent,
}

/// A named keyword pattern in the content screen.
pub struct ScreenPattern {
    pub category: ScreenCategory,
    pub regex: Regex,
}

// Plain substring alternations, not word-bounded: "skills" matches "kill".
static SCREEN_PATTERNS: LazyLock<Vec<ScreenPattern>> = LazyLock::new(|| {
    [
        (
            ScreenCategory::SelfHarmOrViolence,
            r"(?i)(?:suicide|self-harm|kill|death|violence)",
        ),
        (ScreenCategory::IllegalActivity, r"(?i)(?:illegal|drugs|crime|fraud)"),
        (ScreenCategory::SexualContent, r"(?i)(?:inappropriate|nsfw|sexual)"),
    ]
    .into_iter()
    .map(|(category, pattern)| ScreenPattern {
        category,
        regex: Regex::new(pattern).expect("screen pattern must compile"),
    })
    .collect()
});

/// The full pattern set, in evaluation order.
pub fn screen_patterns() -> &'static [ScreenPattern] {
    &SCREEN_PATTERNS
}

/// Return the category of the first pattern matching `text`, if any.
///
/// This is a blunt keyword filter. A `None` result is not a content-safety
/// guarantee, and legitimate text ("death of a salesman", "skills") is flagged.
pub fn screen_content(text: &str) -> Option<ScreenCategory> {
    screen_patterns()
        .iter()
        .find(|p| p.regex.is_match(text))
        .map(|p| p.category)
}
