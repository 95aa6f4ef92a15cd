//! The rule capability shared by rules and schemas.

use serde_json::Value;

use crate::error::RuleError;
use crate::path::SchemaPath;
use crate::schema::Schema;

/// A check that can be run against a value.
///
/// `Rule` is the one capability the schema engine composes: leaf rules,
/// rule sets and whole schemas all implement it, so any of them can be used
/// as a field declaration or as one of a schema's own rules.
///
/// The `Send + Sync` bounds allow rules to be shared across threads inside
/// `Arc<dyn Rule>`.
///
/// # Example
///
/// ```rust
/// use rulebound::rule::Rule;
/// use rulebound::{RuleError, SchemaPath};
/// use serde_json::Value;
///
/// struct Even;
///
/// impl Rule for Even {
///     fn errors(
///         &self,
///         value: &Value,
///         _context: Option<&Value>,
///         path: &SchemaPath,
///         _short_circuit: bool,
///     ) -> Vec<RuleError> {
///         match value.as_i64() {
///             Some(n) if n % 2 != 0 => vec![RuleError::new(path.clone(), "must be even")],
///             _ => Vec::new(),
///         }
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Evaluates `value` and returns every error found, in order.
    ///
    /// `context` is caller-supplied data passed through unchanged. When
    /// `short_circuit` is true the rule may stop after its first error.
    fn errors(
        &self,
        value: &Value,
        context: Option<&Value>,
        path: &SchemaPath,
        short_circuit: bool,
    ) -> Vec<RuleError>;

    /// Returns this rule as a schema node, if it is one.
    fn as_schema(&self) -> Option<&Schema> {
        None
    }
}
