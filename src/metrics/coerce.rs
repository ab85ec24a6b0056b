//! Conversion of untyped request values into numbers.
//!
//! Every entry point records its failure in the caller's [`ValidationErrors`]
//! and returns `None` instead of bailing out, so a single request reports all
//! of its bad fields at once.

use serde_json::Value;

use super::ValidationErrors;

/// Absent, `null` and `""` all count as "not provided".
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Parse an integer without recording anything.
///
/// Accepts JSON integers, JSON floats (truncated toward zero) and strings
/// holding an integer. Booleans, arrays and objects are rejected.
pub fn parse_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Parse a finite float without recording anything.
pub fn parse_float(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.filter(|f: &f64| f.is_finite())
}

fn truncate(value: f64) -> Option<i64> {
    // i64::MAX is not exactly representable; the strict bounds keep the cast exact
    if value.is_finite() && value > i64::MIN as f64 && value < i64::MAX as f64 {
        Some(value.trunc() as i64)
    } else {
        None
    }
}

pub fn to_int(value: Option<&Value>, field: &str, errors: &mut ValidationErrors) -> Option<i64> {
    if is_blank(value) {
        errors.push(format!("{field} is required and must be a number"));
        return None;
    }
    let parsed = value.and_then(parse_int);
    if parsed.is_none() {
        errors.push(format!("{field} must be an integer"));
    }
    parsed
}

pub fn to_float(value: Option<&Value>, field: &str, errors: &mut ValidationErrors) -> Option<f64> {
    if is_blank(value) {
        errors.push(format!("{field} is required and must be a number"));
        return None;
    }
    let parsed = value.and_then(parse_float);
    if parsed.is_none() {
        errors.push(format!("{field} must be a number"));
    }
    parsed
}

/// Integer coercion for fallback paths: never records an error.
pub fn lenient_int(value: Option<&Value>) -> Option<i64> {
    value.and_then(parse_int)
}

/// `units` is free-form but must be a non-empty string.
pub fn to_units(value: Option<&Value>, errors: &mut ValidationErrors) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => {
            errors.push("units is required");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_int_accepts_numbers_and_numeric_strings() {
        let mut errors = ValidationErrors::new();

        assert_eq!(to_int(Some(&json!(12)), "reps", &mut errors), Some(12));
        assert_eq!(to_int(Some(&json!("12")), "reps", &mut errors), Some(12));
        assert_eq!(to_int(Some(&json!(" 7 ")), "reps", &mut errors), Some(7));
        assert_eq!(to_int(Some(&json!(-3)), "reps", &mut errors), Some(-3));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_to_int_truncates_floats() {
        let mut errors = ValidationErrors::new();

        assert_eq!(to_int(Some(&json!(12.9)), "reps", &mut errors), Some(12));
        assert_eq!(to_int(Some(&json!(-2.5)), "reps", &mut errors), Some(-2));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_to_int_missing_values() {
        for value in [None, Some(json!(null)), Some(json!(""))] {
            let mut errors = ValidationErrors::new();
            assert_eq!(to_int(value.as_ref(), "sets", &mut errors), None);
            assert_eq!(errors.messages(), ["sets is required and must be a number"]);
        }
    }

    #[test]
    fn test_to_int_invalid_values() {
        for value in [json!("abc"), json!("1.5"), json!(true), json!([1]), json!({"a": 1})] {
            let mut errors = ValidationErrors::new();
            assert_eq!(to_int(Some(&value), "sets", &mut errors), None);
            assert_eq!(errors.messages(), ["sets must be an integer"]);
        }
    }

    #[test]
    fn test_to_int_rejects_out_of_range_floats() {
        let mut errors = ValidationErrors::new();

        assert_eq!(to_int(Some(&json!(1e300)), "rm", &mut errors), None);
        assert_eq!(errors.messages(), ["rm must be an integer"]);
    }

    #[test]
    fn test_to_float() {
        let mut errors = ValidationErrors::new();

        assert_eq!(to_float(Some(&json!(50)), "weight", &mut errors), Some(50.0));
        assert_eq!(to_float(Some(&json!("42.5")), "weight", &mut errors), Some(42.5));
        assert!(errors.is_empty());

        assert_eq!(to_float(Some(&json!("heavy")), "weight", &mut errors), None);
        assert_eq!(to_float(Some(&json!("NaN")), "weight", &mut errors), None);
        assert_eq!(to_float(None, "weight", &mut errors), None);
        assert_eq!(
            errors.messages(),
            [
                "weight must be a number",
                "weight must be a number",
                "weight is required and must be a number",
            ]
        );
    }

    #[test]
    fn test_lenient_int_records_nothing() {
        assert_eq!(lenient_int(Some(&json!("9"))), Some(9));
        assert_eq!(lenient_int(Some(&json!("nine"))), None);
        assert_eq!(lenient_int(None), None);
    }

    #[test]
    fn test_to_units() {
        let mut errors = ValidationErrors::new();

        assert_eq!(to_units(Some(&json!("kg")), &mut errors), Some("kg".to_string()));
        assert!(errors.is_empty());

        assert_eq!(to_units(Some(&json!("")), &mut errors), None);
        assert_eq!(to_units(Some(&json!(5)), &mut errors), None);
        assert_eq!(to_units(None, &mut errors), None);
        assert_eq!(errors.len(), 3);
        assert!(errors.messages().iter().all(|m| m == "units is required"));
    }
}
