//! Predicate-backed rules and rule composition.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{RuleError, DEFAULT_STATUS};
use crate::path::SchemaPath;

use super::run_rules;
use super::traits::Rule;

/// Reason reported by a predicate that was declared without one.
pub const DEFAULT_REASON: &str = "is invalid";

type PredicateFn = dyn Fn(&Value, Option<&Value>) -> bool + Send + Sync;

/// A bare pass/fail callable, as accepted in schema declarations.
///
/// Predicates carry no reason or status of their own. A failing predicate is
/// reported with the owning schema's message and status; wrap it in an
/// [`FnRule`] to give it a reason of its own.
#[derive(Clone)]
pub struct Predicate(Arc<PredicateFn>);

impl Predicate {
    /// Creates a predicate over the value alone.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(move |value: &Value, _: Option<&Value>| f(value)))
    }

    /// Creates a predicate that also sees the evaluation context.
    pub fn with_context<F>(f: F) -> Self
    where
        F: Fn(&Value, Option<&Value>) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Runs the predicate.
    pub fn test(&self, value: &Value, context: Option<&Value>) -> bool {
        (self.0)(value, context)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

/// Shorthand for [`Predicate::new`].
///
/// # Example
///
/// ```rust
/// use rulebound::{predicate, Object, Schema};
/// use serde_json::json;
///
/// let schema = Schema::new(
///     Object::new()
///         .with("name", "contact")
///         .with("schema", Object::new().with("name", predicate(|v| v.is_string()))),
/// );
///
/// assert!(schema.matches(&json!({"name": "Joe"})));
/// ```
pub fn predicate<F>(f: F) -> Predicate
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    Predicate::new(f)
}

/// A rule backed by a predicate, a reason and a status code.
///
/// When the predicate returns false a single error is produced at the given
/// path.
///
/// # Example
///
/// ```rust
/// use rulebound::rule::{FnRule, Rule};
/// use rulebound::SchemaPath;
/// use serde_json::json;
///
/// let adult = FnRule::new(|v| v.as_u64().map_or(true, |age| age >= 18))
///     .reason("must be an adult")
///     .status(403);
///
/// let errors = adult.errors(&json!(12), None, &SchemaPath::from_field("age"), false);
/// assert_eq!(errors[0].message(), "age must be an adult");
/// assert_eq!(errors[0].status_code, 403);
/// ```
#[derive(Clone)]
pub struct FnRule {
    predicate: Predicate,
    reason: String,
    status_code: u16,
}

impl FnRule {
    /// Creates a rule over the value alone with the default reason and status.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::from_predicate(Predicate::new(f))
    }

    /// Creates a rule whose predicate also sees the evaluation context.
    pub fn with_context<F>(f: F) -> Self
    where
        F: Fn(&Value, Option<&Value>) -> bool + Send + Sync + 'static,
    {
        Self::from_predicate(Predicate::with_context(f))
    }

    /// Wraps an existing predicate with the default reason and status.
    pub fn from_predicate(predicate: Predicate) -> Self {
        Self {
            predicate,
            reason: DEFAULT_REASON.to_string(),
            status_code: DEFAULT_STATUS,
        }
    }

    /// Sets the reason reported on failure.
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    /// Sets the status code reported on failure.
    pub fn status(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }
}

impl Rule for FnRule {
    fn errors(
        &self,
        value: &Value,
        context: Option<&Value>,
        path: &SchemaPath,
        _short_circuit: bool,
    ) -> Vec<RuleError> {
        if self.predicate.test(value, context) {
            Vec::new()
        } else {
            vec![RuleError::new(path.clone(), self.reason.clone()).with_status(self.status_code)]
        }
    }
}

impl fmt::Debug for FnRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnRule")
            .field("reason", &self.reason)
            .field("status_code", &self.status_code)
            .finish()
    }
}

/// An ordered composite of rules.
///
/// Every rule runs against the same value and path; errors are reported in
/// rule order. Under short-circuit evaluation the set stops after the first
/// rule that reports anything.
#[derive(Clone, Default)]
pub struct RuleSet {
    rules: Vec<Arc<dyn Rule>>,
}

impl RuleSet {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule.
    pub fn with<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Appends an already shared rule.
    pub fn with_shared(mut self, rule: Arc<dyn Rule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Returns the number of rules in the set.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the set holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Rule for RuleSet {
    fn errors(
        &self,
        value: &Value,
        context: Option<&Value>,
        path: &SchemaPath,
        short_circuit: bool,
    ) -> Vec<RuleError> {
        run_rules(&self.rules, short_circuit, |rule| {
            rule.errors(value, context, path, short_circuit)
        })
    }
}

impl FromIterator<Arc<dyn Rule>> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Arc<dyn Rule>>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path() -> SchemaPath {
        SchemaPath::from_field("field")
    }

    #[test]
    fn test_fn_rule_defaults() {
        let rule = FnRule::new(|v| v.is_string());
        let errors = rule.errors(&json!(1), None, &path(), false);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].reason, DEFAULT_REASON);
        assert_eq!(errors[0].status_code, DEFAULT_STATUS);
        assert!(rule.errors(&json!("x"), None, &path(), false).is_empty());
    }

    #[test]
    fn test_fn_rule_sees_context() {
        let rule = FnRule::with_context(|v, ctx| ctx.map_or(false, |c| c == v));

        assert!(rule.errors(&json!(1), Some(&json!(1)), &path(), false).is_empty());
        assert_eq!(rule.errors(&json!(1), None, &path(), false).len(), 1);
    }

    #[test]
    fn test_rule_set_runs_all_rules() {
        let set = RuleSet::new()
            .with(FnRule::new(|_| false).reason("first"))
            .with(FnRule::new(|_| false).reason("second"));

        let errors = set.errors(&json!(null), None, &path(), false);
        let reasons: Vec<_> = errors.iter().map(|e| e.reason.as_str()).collect();
        assert_eq!(reasons, vec!["first", "second"]);
    }

    #[test]
    fn test_rule_set_short_circuits() {
        let set = RuleSet::new()
            .with(FnRule::new(|_| true))
            .with(FnRule::new(|_| false).reason("first"))
            .with(FnRule::new(|_| false).reason("second"));

        let errors = set.errors(&json!(null), None, &path(), true);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].reason, "first");
    }
}
