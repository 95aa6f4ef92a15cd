//! Common rules.
//!
//! Apart from [`required`], every rule here passes on a falsy value so it can
//! be combined with `required` without reporting the same absence twice.

use regex::Regex;
use serde_json::Value;

use crate::value::{is_truthy, value_len};

use super::predicate::FnRule;

/// Rejects `null` and the empty string.
///
/// # Example
///
/// ```rust
/// use rulebound::rule::{self, Rule};
/// use rulebound::SchemaPath;
/// use serde_json::json;
///
/// let path = SchemaPath::from_field("name");
/// assert!(rule::required().errors(&json!("Joe"), None, &path, false).is_empty());
/// assert_eq!(
///     rule::required().errors(&json!(""), None, &path, false)[0].message(),
///     "name is required"
/// );
/// ```
pub fn required() -> FnRule {
    FnRule::new(|value| !matches!(value, Value::Null) && value.as_str() != Some(""))
        .reason("is required")
}

/// Requires strings, arrays and objects to hold at least `min` chars, elements or keys.
pub fn min_len(min: usize) -> FnRule {
    FnRule::new(move |value| !is_truthy(value) || value_len(value).map_or(true, |len| len >= min))
        .reason(format!("must be a minimum of {} long", min))
}

/// Requires strings, arrays and objects to hold at most `max` chars, elements or keys.
pub fn max_len(max: usize) -> FnRule {
    FnRule::new(move |value| !is_truthy(value) || value_len(value).map_or(true, |len| len <= max))
        .reason(format!("may be a maximum of {} long", max))
}

/// Accepts numbers and `null`.
pub fn number() -> FnRule {
    FnRule::new(|value| value.is_number() || value.is_null()).reason("must be a number")
}

/// Accepts strings and `null`.
pub fn string() -> FnRule {
    FnRule::new(|value| value.is_string() || value.is_null()).reason("must be a string")
}

/// Requires string values to match a regular expression.
///
/// Returns an error if the pattern is not a valid regex.
///
/// # Example
///
/// ```rust
/// use rulebound::rule::{self, Rule};
/// use rulebound::SchemaPath;
/// use serde_json::json;
///
/// let digits = rule::pattern(r"^\d+$").unwrap();
/// let path = SchemaPath::from_field("zip");
///
/// assert!(digits.errors(&json!("12345"), None, &path, false).is_empty());
/// assert_eq!(digits.errors(&json!("abc"), None, &path, false).len(), 1);
/// ```
pub fn pattern(pattern: &str) -> Result<FnRule, regex::Error> {
    let regex = Regex::new(pattern)?;
    Ok(FnRule::new(move |value| match value {
        Value::String(s) if !s.is_empty() => regex.is_match(s),
        _ => true,
    })
    .reason(format!("must match pattern '{}'", pattern)))
}

/// Requires the value to equal one of `allowed`.
pub fn one_of(allowed: impl IntoIterator<Item = Value>) -> FnRule {
    let allowed: Vec<Value> = allowed.into_iter().collect();
    let listed = allowed
        .iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    FnRule::new(move |value| !is_truthy(value) || allowed.contains(value))
        .reason(format!("must be one of {}", listed))
}
