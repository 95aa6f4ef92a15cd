//! Rules: the single-value checks that schemas are built from.
//!
//! A [`Rule`] evaluates a value (plus an optional context) at a given path and
//! returns the ordered list of errors it found. Schemas implement the same
//! trait, so a built schema can be used anywhere a rule is expected.
//!
//! This module also provides [`FnRule`] for wrapping plain predicates,
//! [`RuleSet`] for composing rules, and a small library of common rules.
//!
//! # Example
//!
//! ```rust
//! use rulebound::rule::{self, Rule};
//! use rulebound::SchemaPath;
//! use serde_json::json;
//!
//! let rule = rule::min_len(3);
//! let errors = rule.errors(&json!("ab"), None, &SchemaPath::from_field("code"), false);
//! assert_eq!(errors[0].message(), "code must be a minimum of 3 long");
//! ```

mod builtin;
mod predicate;
mod traits;

pub use builtin::{max_len, min_len, number, one_of, pattern, required, string};
pub use predicate::{predicate, FnRule, Predicate, RuleSet, DEFAULT_REASON};
pub use traits::Rule;

use crate::error::RuleError;

/// Collects the errors `errors_for` reports for each rule in order, stopping
/// after the first rule that reports anything when short-circuiting.
pub(crate) fn run_rules<'r, R: 'r>(
    rules: impl IntoIterator<Item = &'r R>,
    short_circuit: bool,
    mut errors_for: impl FnMut(&'r R) -> Vec<RuleError>,
) -> Vec<RuleError> {
    let mut errors = Vec::new();
    for rule in rules {
        errors.extend(errors_for(rule));
        if short_circuit && !errors.is_empty() {
            break;
        }
    }
    errors
}
