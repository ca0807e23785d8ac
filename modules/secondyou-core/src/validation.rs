//! Profile validation and sanitization.
//!
//! Checks run in a fixed order and the first failure wins, so a caller with
//! several bad fields always sees the same message.

use serde_json::Value;

use secondyou_common::{screen_content, ProfileInput, RawProfile, SimulationError};

pub const MSG_REQUIRED: &str =
    "All fields are required: age, location, profession, traits, alternatePath";
pub const MSG_AGE: &str = "Age must be a number between 13 and 100";
pub const MSG_LOCATION: &str = "Location must be between 2 and 100 characters";
pub const MSG_PROFESSION: &str = "Profession must be between 5 and 200 characters";
pub const MSG_TRAITS: &str = "Traits must be between 10 and 500 characters";
pub const MSG_ALTERNATE_PATH: &str = "Alternate path must be between 10 and 1000 characters";
pub const MSG_INAPPROPRIATE: &str =
    "Input contains inappropriate content. Please revise your submission.";
pub const MSG_NOT_TEXT: &str = "All text fields must be strings";

pub const MIN_AGE: i64 = 13;
pub const MAX_AGE: i64 = 100;

/// Longest text any sanitized field may carry.
const SANITIZED_MAX_CHARS: usize = 1000;

/// Validate a raw request body and return the sanitized profile.
pub fn validate_profile(raw: &RawProfile) -> Result<ProfileInput, SimulationError> {
    let fields = [
        &raw.age,
        &raw.location,
        &raw.profession,
        &raw.traits,
        &raw.alternate_path,
    ];
    if fields.iter().any(|f| !is_present(f)) {
        return Err(invalid(MSG_REQUIRED));
    }

    let age = raw
        .age
        .as_ref()
        .and_then(parse_int)
        .filter(|a| (MIN_AGE..=MAX_AGE).contains(a))
        .ok_or_else(|| invalid(MSG_AGE))?;

    let location = text_field(&raw.location, 2, 100, MSG_LOCATION)?;
    let profession = text_field(&raw.profession, 5, 200, MSG_PROFESSION)?;
    let traits = text_field(&raw.traits, 10, 500, MSG_TRAITS)?;
    let alternate_path = text_field(&raw.alternate_path, 10, 1000, MSG_ALTERNATE_PATH)?;

    // Screen what will actually be forwarded, after brackets are gone.
    let combined = format!("{location} {profession} {traits} {alternate_path}").to_lowercase();
    if screen_content(&combined).is_some() {
        return Err(invalid(MSG_INAPPROPRIATE));
    }

    Ok(ProfileInput {
        age: age as u8,
        location,
        profession,
        traits,
        alternate_path,
    })
}

/// Trim, drop angle brackets, collapse whitespace runs and cap the length.
pub fn sanitize_text(s: &str) -> String {
    let without_brackets: String = s.chars().filter(|c| *c != '<' && *c != '>').collect();
    let collapsed = without_brackets.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(SANITIZED_MAX_CHARS).collect()
}

fn invalid(message: &str) -> SimulationError {
    SimulationError::Validation(message.to_string())
}

/// Absent, null, false, zero and the empty string all count as missing.
fn is_present(value: &Option<Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Integer reading of an age value: numbers truncate toward zero, strings use
/// their leading integer prefix ("28 years" is 28).
fn parse_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => leading_int(s),
        _ => None,
    }
}

fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // Saturate absurdly long digit strings; they fail the range check anyway.
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Range-check the trimmed text, then sanitize it. The sanitized form must
/// still meet the minimum, so markup-only input cannot slip through.
fn text_field(
    value: &Option<Value>,
    min: usize,
    max: usize,
    message: &str,
) -> Result<String, SimulationError> {
    let sanitized = sanitize_text(text_in_range(value, min, max, message)?);
    if sanitized.chars().count() < min {
        return Err(invalid(message));
    }
    Ok(sanitized)
}

/// Borrow a text field and check its trimmed length, or reject non-text.
fn text_in_range<'a>(
    value: &'a Option<Value>,
    min: usize,
    max: usize,
    message: &str,
) -> Result<&'a str, SimulationError> {
    let Some(Value::String(s)) = value else {
        return Err(invalid(MSG_NOT_TEXT));
    };
    let len = s.trim().chars().count();
    if len < min || len > max {
        return Err(invalid(message));
    }
    Ok(s.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_body() -> Value {
        json!({
            "age": 28,
            "location": "Austin, TX",
            "profession": "Marketing coordinator at a mid-size firm",
            "traits": "Curious, risk-averse, values stability",
            "alternatePath": "What if I quit to become a full-time potter?"
        })
    }

    fn with(field: &str, value: Value) -> RawProfile {
        let mut body = valid_body();
        body[field] = value;
        serde_json::from_value(body).unwrap()
    }

    fn without(field: &str) -> RawProfile {
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove(field);
        serde_json::from_value(body).unwrap()
    }

    fn message(raw: &RawProfile) -> Option<String> {
        validate_profile(raw).err().map(|e| e.to_string())
    }

    #[test]
    fn valid_profile_passes() {
        let profile = validate_profile(&with("age", json!(28))).unwrap();
        assert_eq!(profile.age, 28);
        assert_eq!(profile.location, "Austin, TX");
    }

    #[test]
    fn each_missing_field_reports_all_required() {
        for field in ["age", "location", "profession", "traits", "alternatePath"] {
            assert_eq!(message(&without(field)).as_deref(), Some(MSG_REQUIRED), "{field}");
        }
    }

    #[test]
    fn falsy_values_count_as_missing() {
        assert_eq!(message(&with("age", json!(0))).as_deref(), Some(MSG_REQUIRED));
        assert_eq!(message(&with("location", json!(""))).as_deref(), Some(MSG_REQUIRED));
        assert_eq!(message(&with("traits", json!(false))).as_deref(), Some(MSG_REQUIRED));
        assert_eq!(message(&with("traits", json!(null))).as_deref(), Some(MSG_REQUIRED));
    }

    #[test]
    fn missing_field_wins_over_bad_age() {
        let mut body = valid_body();
        body["age"] = json!(5);
        body.as_object_mut().unwrap().remove("traits");
        let raw: RawProfile = serde_json::from_value(body).unwrap();
        assert_eq!(message(&raw).as_deref(), Some(MSG_REQUIRED));
    }

    #[test]
    fn age_boundaries_are_inclusive() {
        assert!(message(&with("age", json!(13))).is_none());
        assert!(message(&with("age", json!(100))).is_none());
        assert_eq!(message(&with("age", json!(12))).as_deref(), Some(MSG_AGE));
        assert_eq!(message(&with("age", json!(101))).as_deref(), Some(MSG_AGE));
        assert_eq!(message(&with("age", json!(-20))).as_deref(), Some(MSG_AGE));
    }

    #[test]
    fn age_accepts_numeric_strings_and_fractions() {
        assert_eq!(validate_profile(&with("age", json!("28"))).unwrap().age, 28);
        assert_eq!(validate_profile(&with("age", json!(" 42 years"))).unwrap().age, 42);
        assert_eq!(validate_profile(&with("age", json!(30.9))).unwrap().age, 30);
        assert_eq!(message(&with("age", json!("twenty"))).as_deref(), Some(MSG_AGE));
        assert_eq!(message(&with("age", json!(true))).as_deref(), Some(MSG_AGE));
    }

    #[test]
    fn location_length_boundaries() {
        assert!(message(&with("location", json!("NY"))).is_none());
        assert!(message(&with("location", json!("x".repeat(100)))).is_none());
        assert_eq!(message(&with("location", json!("N"))).as_deref(), Some(MSG_LOCATION));
        assert_eq!(
            message(&with("location", json!("x".repeat(101)))).as_deref(),
            Some(MSG_LOCATION)
        );
    }

    #[test]
    fn lengths_are_measured_after_trimming() {
        assert_eq!(message(&with("location", json!("   N   "))).as_deref(), Some(MSG_LOCATION));
        assert!(message(&with("location", json!("  NY  "))).is_none());
    }

    #[test]
    fn other_text_field_ranges() {
        assert_eq!(message(&with("profession", json!("Chef"))).as_deref(), Some(MSG_PROFESSION));
        assert_eq!(message(&with("traits", json!("too short"))).as_deref(), Some(MSG_TRAITS));
        assert_eq!(
            message(&with("alternatePath", json!("x".repeat(1001)))).as_deref(),
            Some(MSG_ALTERNATE_PATH)
        );
    }

    #[test]
    fn violence_in_alternate_path_is_rejected() {
        let raw = with("alternatePath", json!("What if I wrote novels about Violence?"));
        assert_eq!(message(&raw).as_deref(), Some(MSG_INAPPROPRIATE));
    }

    #[test]
    fn length_errors_precede_content_screen() {
        let mut body = valid_body();
        body["location"] = json!("X");
        body["alternatePath"] = json!("a life of crime and violence");
        let raw: RawProfile = serde_json::from_value(body).unwrap();
        assert_eq!(message(&raw).as_deref(), Some(MSG_LOCATION));
    }

    #[test]
    fn non_text_field_is_rejected() {
        let raw = with("traits", json!(12345678901i64));
        assert_eq!(message(&raw).as_deref(), Some(MSG_NOT_TEXT));
        assert_eq!(message(&with("location", json!(["Austin"]))).as_deref(), Some(MSG_NOT_TEXT));
    }

    #[test]
    fn sanitize_strips_brackets_and_collapses_whitespace() {
        assert_eq!(sanitize_text("  <b>Austin</b>,\n\t TX  "), "bAustin/b, TX");
        assert_eq!(sanitize_text(&"y".repeat(1500)).chars().count(), 1000);
    }

    #[test]
    fn validated_profile_is_sanitized() {
        let raw = with("profession", json!("  Senior   <i>baker</i> "));
        let profile = validate_profile(&raw).unwrap();
        assert_eq!(profile.profession, "Senior ibaker/i");
    }

    #[test]
    fn screen_sees_text_with_brackets_removed() {
        let raw = with("alternatePath", json!("What if I studied vio<>lence and k<i>lling?"));
        assert_eq!(message(&raw).as_deref(), Some(MSG_INAPPROPRIATE));
    }

    #[test]
    fn markup_only_field_fails_its_length_rule() {
        assert_eq!(message(&with("location", json!("<<>>"))).as_deref(), Some(MSG_LOCATION));
        assert_eq!(
            message(&with("profession", json!("<a> <b>"))).as_deref(),
            Some(MSG_PROFESSION)
        );
    }

    #[test]
    fn forwarded_fields_meet_minimum_lengths() {
        let profile = validate_profile(&with("location", json!("<N>Y"))).unwrap();
        assert_eq!(profile.location, "NY");
        assert!(profile.location.chars().count() >= 2);
    }
}
