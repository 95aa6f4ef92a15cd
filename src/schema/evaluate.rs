//! Recursive evaluation of schema nodes.
//!
//! Item nodes run their own rules and then descend into their children field
//! by field. Array and map nodes first check the container as a whole, then
//! evaluate every element or entry as an item.

use serde_json::Value;

use crate::error::{RuleError, DEFAULT_STATUS};
use crate::path::SchemaPath;
use crate::rule::{run_rules, DEFAULT_REASON};
use crate::value::is_truthy;

use super::{NodeRule, Schema};

static NULL: Value = Value::Null;

/// Per-call evaluation settings.
///
/// # Example
///
/// ```rust
/// use rulebound::{EvalOptions, SchemaPath};
/// use serde_json::json;
///
/// let context = json!({"role": "admin"});
/// let options = EvalOptions::new()
///     .context(&context)
///     .path(SchemaPath::from_field("payload"))
///     .short_circuit(true);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EvalOptions<'a> {
    pub(super) context: Option<&'a Value>,
    pub(super) path: Option<SchemaPath>,
    pub(super) short_circuit: bool,
}

impl<'a> EvalOptions<'a> {
    /// Creates options with no context, the node's own name as path and full
    /// error accumulation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the context passed to every rule.
    pub fn context(mut self, context: &'a Value) -> Self {
        self.context = Some(context);
        self
    }

    /// Sets the path errors are reported under, replacing the node's name.
    pub fn path(mut self, path: impl Into<SchemaPath>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Stops at the first failing branch when true.
    pub fn short_circuit(mut self, short_circuit: bool) -> Self {
        self.short_circuit = short_circuit;
        self
    }
}

impl Schema {
    pub(super) fn item_errors(
        &self,
        value: &Value,
        context: Option<&Value>,
        path: &SchemaPath,
        short_circuit: bool,
    ) -> Vec<RuleError> {
        let mut errors = self.run(&self.rules, value, context, path, short_circuit);
        if short_circuit && !errors.is_empty() {
            return errors;
        }

        // Absent containers are not faulted for missing children.
        if !is_truthy(value) {
            return errors;
        }

        let context = if self.inherit_context {
            context.or(Some(value))
        } else {
            context
        };

        for (name, child) in &self.children {
            let child_value = value.get(name.as_str()).unwrap_or(&NULL);
            let child_path = path.push_field(name.as_str());
            errors.extend(child.errors(child_value, context, &child_path, short_circuit));
            if short_circuit && !errors.is_empty() {
                break;
            }
        }

        errors
    }

    pub(super) fn array_errors(
        &self,
        value: &Value,
        context: Option<&Value>,
        path: &SchemaPath,
        short_circuit: bool,
    ) -> Vec<RuleError> {
        // An absent list is valid and runs no container rules.
        if value.is_null() {
            return Vec::new();
        }

        let mut errors = self.container_errors(
            value.is_array(),
            "must be an array",
            value,
            context,
            path,
            short_circuit,
        );
        if short_circuit && !errors.is_empty() {
            return errors;
        }

        if let Some(items) = value.as_array() {
            for (index, item) in items.iter().enumerate() {
                let item_path = path.push_index(index);
                errors.extend(self.item_errors(item, context, &item_path, short_circuit));
                if short_circuit && !errors.is_empty() {
                    break;
                }
            }
        }

        errors
    }

    pub(super) fn map_errors(
        &self,
        value: &Value,
        context: Option<&Value>,
        path: &SchemaPath,
        short_circuit: bool,
    ) -> Vec<RuleError> {
        if value.is_null() {
            return Vec::new();
        }

        let mut errors = self.container_errors(
            value.is_object(),
            "must be a dictionary",
            value,
            context,
            path,
            short_circuit,
        );
        if short_circuit && !errors.is_empty() {
            return errors;
        }

        if let Some(entries) = value.as_object() {
            for (key, entry) in entries {
                let entry_path = path.push_key(key.as_str());
                errors.extend(self.item_errors(entry, context, &entry_path, short_circuit));
                if short_circuit && !errors.is_empty() {
                    break;
                }
            }
        }

        errors
    }

    /// Runs the built-in shape check followed by the discipline's container rules.
    fn container_errors(
        &self,
        shape_ok: bool,
        shape_reason: &str,
        value: &Value,
        context: Option<&Value>,
        path: &SchemaPath,
        short_circuit: bool,
    ) -> Vec<RuleError> {
        let mut errors = Vec::new();
        if !shape_ok {
            errors.push(RuleError::new(path.clone(), shape_reason).with_status(DEFAULT_STATUS));
            if short_circuit {
                return errors;
            }
        }
        errors.extend(self.run(self.container_rules(), value, context, path, short_circuit));
        errors
    }

    fn run(
        &self,
        rules: &[NodeRule],
        value: &Value,
        context: Option<&Value>,
        path: &SchemaPath,
        short_circuit: bool,
    ) -> Vec<RuleError> {
        run_rules(rules, short_circuit, |rule| match rule {
            NodeRule::Shared(rule) => rule.errors(value, context, path, short_circuit),
            NodeRule::Predicate(p) if p.test(value, context) => Vec::new(),
            NodeRule::Predicate(_) => vec![self.predicate_error(path)],
        })
    }

    fn predicate_error(&self, path: &SchemaPath) -> RuleError {
        let reason = self.message.as_deref().unwrap_or(DEFAULT_REASON);
        RuleError::new(path.clone(), reason).with_status(self.status_code.unwrap_or(DEFAULT_STATUS))
    }
}
