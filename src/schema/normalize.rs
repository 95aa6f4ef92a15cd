//! Declaration classification.
//!
//! Turns raw [`Declaration`]s into schema nodes. Classification is eager and
//! total: every declaration yields exactly one node or rule, including
//! declarations that make no sense, which become invalid nodes.
//!
//! Precedence, for a declaration under field key `k`:
//! 1. a rule object is reused as-is (a nameless schema takes `k` as its name)
//! 2. an object carrying schema options is built into a schema
//! 3. a list becomes a node whose own rules are the list items
//! 4. any other object is a raw field map and becomes a node with those children
//! 5. a bare predicate becomes a node with that single rule
//! 6. anything else becomes an invalid node

use std::sync::Arc;

use serde_json::Value;

use crate::rule::Rule;
use crate::value::value_type_name;

use super::declaration::{Declaration, Object};
use super::{Discipline, NodeRule, Schema};

const NAME: &str = "name";
const RULES: &str = "rules";
const SCHEMA: &str = "schema";
const ARRAY_RULES: &str = "arrayRules";
const DICT_RULES: &str = "dictRules";
const IS_ARRAY: &str = "isArray";
const IS_DICT: &str = "isDict";
const MESSAGE: &str = "message";
const STATUS_CODE: &str = "statusCode";
const INHERIT_CONTEXT: &str = "inheritContext";

/// Normalizes the declaration of the field `key`.
pub(super) fn field(key: &str, declaration: Declaration) -> Arc<dyn Rule> {
    match classify(declaration) {
        Classified::Node(schema) => Arc::new(default_name(schema, key)),
        Classified::Rule(rule) => match rule.as_schema() {
            Some(schema) if schema.name.is_none() => Arc::new(default_name(schema.clone(), key)),
            _ => rule,
        },
    }
}

/// Builds a schema from an options object.
pub(super) fn from_options(options: Object) -> Schema {
    let mut schema = Schema::default();
    let mut is_array = false;
    let mut is_dict = false;

    for (key, value) in options {
        match key.as_str() {
            NAME if value.as_str().is_some() => {
                schema.name = value.as_str().map(str::to_string);
            }
            RULES => push_rules(&mut schema.rules, value),
            SCHEMA => match value {
                Declaration::Object(fields) => {
                    for (name, declaration) in fields {
                        let child = field(&name, declaration);
                        schema.children.insert(name, child);
                    }
                }
                other => {
                    tracing::debug!(?other, "`schema` option is not a field map, keeping it as an extension");
                    schema.extensions.insert(key, other);
                }
            },
            ARRAY_RULES => {
                push_rules(&mut schema.array_rules, value);
                is_array = true;
            }
            DICT_RULES => {
                push_rules(&mut schema.dict_rules, value);
                is_dict = true;
            }
            IS_ARRAY | IS_DICT => match value.as_bool() {
                Some(flag) => {
                    if key == IS_ARRAY {
                        is_array |= flag;
                    } else {
                        is_dict |= flag;
                    }
                }
                None => {
                    tracing::debug!(key = %key, "non-boolean container flag ignored");
                    schema.extensions.insert(key, value);
                }
            },
            MESSAGE if value.as_str().is_some() => {
                schema.message = value.as_str().map(str::to_string);
            }
            STATUS_CODE if status_code(&value).is_some() => {
                schema.status_code = status_code(&value);
            }
            INHERIT_CONTEXT if value.as_bool().is_some() => {
                schema.inherit_context = value.as_bool().unwrap_or_default();
            }
            _ => {
                schema.extensions.insert(key, value);
            }
        }
    }

    schema.discipline = if is_dict {
        Discipline::Map
    } else if is_array {
        Discipline::Array
    } else {
        Discipline::Item
    };
    schema
}

/// Appends the rules a declaration stands for.
///
/// Lists are flattened in order. Rules and predicates are kept; any other
/// item is normalized into a nameless node and run as a rule.
pub(super) fn push_rules(rules: &mut Vec<NodeRule>, declaration: Declaration) {
    match declaration {
        Declaration::List(items) => {
            for item in items {
                push_rules(rules, item);
            }
        }
        Declaration::Predicate(p) => rules.push(NodeRule::Predicate(p)),
        Declaration::Rule(rule) => rules.push(NodeRule::Shared(rule)),
        other => match classify(other) {
            Classified::Node(schema) => rules.push(NodeRule::Shared(Arc::new(schema))),
            Classified::Rule(rule) => rules.push(NodeRule::Shared(rule)),
        },
    }
}

enum Classified {
    Node(Schema),
    Rule(Arc<dyn Rule>),
}

fn classify(declaration: Declaration) -> Classified {
    match declaration {
        Declaration::Rule(rule) => Classified::Rule(rule),
        Declaration::Object(object) if is_schema_options(&object) => {
            Classified::Node(from_options(object))
        }
        Declaration::List(items) => {
            let mut schema = Schema::default();
            push_rules(&mut schema.rules, Declaration::List(items));
            Classified::Node(schema)
        }
        Declaration::Object(fields) => {
            let mut schema = Schema::default();
            for (name, declaration) in fields {
                let child = field(&name, declaration);
                schema.children.insert(name, child);
            }
            Classified::Node(schema)
        }
        Declaration::Predicate(p) => {
            let schema = Schema {
                rules: vec![NodeRule::Predicate(p)],
                ..Schema::default()
            };
            Classified::Node(schema)
        }
        Declaration::Scalar(value) => {
            tracing::warn!(
                declaration = %value,
                kind = value_type_name(&value),
                "unclassifiable schema declaration, marking node invalid"
            );
            Classified::Node(Schema::invalid(value))
        }
    }
}

/// Returns true if an object describes a child schema rather than raw fields.
fn is_schema_options(object: &Object) -> bool {
    let rule_like = |key: &str| object.get(key).is_some_and(|d| !d.is_scalar());

    object.get(SCHEMA).is_some_and(|d| d.as_object().is_some())
        || rule_like(RULES)
        || rule_like(ARRAY_RULES)
        || rule_like(DICT_RULES)
        || object.get(IS_ARRAY).is_some_and(|d| d.as_bool().is_some())
        || object.get(IS_DICT).is_some_and(|d| d.as_bool().is_some())
}

fn default_name(mut schema: Schema, key: &str) -> Schema {
    if schema.name.is_none() {
        schema.name = Some(key.to_string());
    }
    schema
}

fn status_code(declaration: &Declaration) -> Option<u16> {
    declaration
        .as_scalar()
        .and_then(Value::as_u64)
        .and_then(|n| u16::try_from(n).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{self, predicate};
    use serde_json::json;

    fn as_schema(rule: &Arc<dyn Rule>) -> &Schema {
        rule.as_schema().expect("expected a schema node")
    }

    #[test]
    fn test_prebuilt_rule_is_kept_verbatim() {
        let shared: Arc<dyn Rule> = Arc::new(rule::required());
        let node = field("name", Declaration::Rule(Arc::clone(&shared)));
        assert!(Arc::ptr_eq(&node, &shared));
    }

    #[test]
    fn test_prebuilt_schema_takes_field_name() {
        let node = field("child", Schema::item().into());
        assert_eq!(as_schema(&node).name.as_deref(), Some("child"));

        let named = field("child", Schema::item().named("kid").into());
        assert_eq!(as_schema(&named).name.as_deref(), Some("kid"));
    }

    #[test]
    fn test_list_becomes_own_rules() {
        let node = field("name", vec![rule::required(), rule::min_len(3)].into());
        let schema = as_schema(&node);
        assert_eq!(schema.rules.len(), 2);
        assert_eq!(schema.children.len(), 0);
        assert_eq!(schema.name.as_deref(), Some("name"));
    }

    #[test]
    fn test_raw_object_becomes_children() {
        let node = field(
            "child",
            Object::new().with("name", predicate(|v| !v.is_null())).into(),
        );
        let schema = as_schema(&node);
        assert_eq!(schema.discipline, Discipline::Item);
        assert!(schema.children.contains_key("name"));
    }

    #[test]
    fn test_options_object_becomes_schema() {
        let node = field(
            "friends",
            Object::new()
                .with(ARRAY_RULES, rule::max_len(5))
                .with(SCHEMA, Object::new().with("name", rule::required()))
                .into(),
        );
        let schema = as_schema(&node);
        assert_eq!(schema.discipline, Discipline::Array);
        assert_eq!(schema.array_rules.len(), 1);
        assert!(schema.children.contains_key("name"));
    }

    #[test]
    fn test_predicate_becomes_single_rule() {
        let node = field("name", predicate(|v| v.is_string()).into());
        assert_eq!(as_schema(&node).rules.len(), 1);
    }

    #[test]
    fn test_scalar_becomes_invalid_node() {
        let node = field("name", json!(42).into());
        let schema = as_schema(&node);
        assert!(schema.is_invalid());
        assert_eq!(schema.invalid_declaration(), Some(&json!(42)));
        assert_eq!(schema.name.as_deref(), Some("name"));
    }

    #[test]
    fn test_non_boolean_container_flag_is_a_field() {
        let node = field(
            "child",
            Object::new()
                .with(IS_ARRAY, Object::new())
                .with("name", predicate(|v| !v.is_null()))
                .into(),
        );
        let schema = as_schema(&node);
        assert_eq!(schema.discipline, Discipline::Item);
        assert!(schema.children.contains_key(IS_ARRAY));
        assert!(schema.children.contains_key("name"));
    }

    #[test]
    fn test_false_container_flag_marks_options() {
        let node = field("child", Object::new().with(IS_ARRAY, false).into());
        let schema = as_schema(&node);
        assert_eq!(schema.discipline, Discipline::Item);
        assert!(schema.children.is_empty());
    }

    #[test]
    fn test_dict_wins_over_array() {
        let schema = from_options(Object::new().with(IS_ARRAY, true).with(IS_DICT, true));
        assert_eq!(schema.discipline, Discipline::Map);
    }

    #[test]
    fn test_unknown_options_are_extensions() {
        let schema = from_options(
            Object::new()
                .with(NAME, "contact")
                .with("label", "Contact card")
                .with(STATUS_CODE, 422)
                .with(MESSAGE, "must exist"),
        );
        assert_eq!(schema.name.as_deref(), Some("contact"));
        assert_eq!(
            schema.extension("label").and_then(Declaration::as_str),
            Some("Contact card")
        );
        assert_eq!(schema.status_code, Some(422));
        assert_eq!(schema.message.as_deref(), Some("must exist"));
    }

    #[test]
    fn test_plain_integer_literals_are_scalars() {
        let schema = from_options(Object::new().with(STATUS_CODE, 404).with("retries", 3u16));
        assert_eq!(schema.status_code, Some(404));
        assert_eq!(
            schema.extension("retries").and_then(Declaration::as_scalar),
            Some(&json!(3))
        );
    }

    #[test]
    fn test_nested_declarations_in_rules_are_normalized() {
        let schema = from_options(Object::new().with(
            RULES,
            vec![
                Declaration::from(rule::required()),
                Declaration::from(vec![predicate(|v| v.is_object())]),
                Declaration::from(Object::new()),
            ],
        ));
        assert_eq!(schema.rules.len(), 3);
    }
}
