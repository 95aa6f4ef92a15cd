//! Integration tests for the array discipline.

use rulebound::{predicate, rule, Discipline, EvalOptions, FnRule, Object, Schema};
use serde_json::{json, Value};

fn contact_with(children: Object) -> Schema {
    Schema::new(
        Object::new()
            .with("name", "contact")
            .with("schema", Object::new().with("children", children)),
    )
}

fn first_message(schema: &Schema, value: &Value) -> String {
    schema
        .errors(value)
        .first()
        .map(|e| e.message())
        .unwrap_or_default()
}

#[test]
fn test_processes_child_schemas() {
    let schema = contact_with(
        Object::new().with("isArray", true).with(
            "schema",
            Object::new().with(
                "name",
                Object::new().with("rules", predicate(rulebound::value::is_truthy)),
            ),
        ),
    );

    assert_eq!(
        first_message(&schema, &json!({"children": [{}]})),
        "contact children #1 name is invalid"
    );
}

#[test]
fn test_processes_child_rules() {
    let schema = contact_with(
        Object::new()
            .with("isArray", true)
            .with("rules", predicate(rulebound::value::is_truthy)),
    );

    assert_eq!(
        first_message(&schema, &json!({"children": [null]})),
        "contact children #1 is invalid"
    );
}

#[test]
fn test_processes_array_rules() {
    let schema = contact_with(
        Object::new()
            .with("isArray", true)
            .with("arrayRules", predicate(|a| a.as_array().map_or(true, |a| !a.is_empty()))),
    );

    assert_eq!(
        first_message(&schema, &json!({"children": []})),
        "contact children is invalid"
    );
}

#[test]
fn test_absent_array_skips_array_rules() {
    let schema = contact_with(
        Object::new()
            .with("isArray", true)
            .with("arrayRules", predicate(|a| a.as_array().is_some_and(|a| !a.is_empty()))),
    );

    assert!(schema.matches(&json!({})));
    assert!(schema.matches(&json!({"children": null})));
    assert_eq!(
        first_message(&schema, &json!({"children": []})),
        "contact children is invalid"
    );
}

#[test]
fn test_array_rules_alone_select_array_discipline() {
    let schema = contact_with(Object::new().with("arrayRules", rule::max_len(1)));
    let children = schema.child("children").and_then(|c| c.as_schema()).unwrap();

    assert_eq!(children.discipline(), Discipline::Array);
    assert_eq!(children.container_rules().len(), 1);
    assert_eq!(
        first_message(&schema, &json!({"children": [1, 2]})),
        "contact children may be a maximum of 1 long"
    );
}

#[test]
fn test_checks_is_array() {
    let schema = contact_with(
        Object::new()
            .with("isArray", true)
            .with("arrayRules", Vec::<FnRule>::new()),
    );

    for value in [json!({}), json!(" "), json!(1), json!(true)] {
        assert_eq!(
            first_message(&schema, &json!({ "children": value })),
            "contact children must be an array"
        );
    }
}

#[test]
fn test_handles_falsy_values() {
    let schema = contact_with(
        Object::new()
            .with("isArray", true)
            .with("arrayRules", Vec::<FnRule>::new()),
    );

    assert!(schema.matches(&json!({})));
    assert!(schema.matches(&json!({"children": null})));
    assert_eq!(
        first_message(&schema, &json!({"children": ""})),
        "contact children must be an array"
    );
    assert_eq!(
        first_message(&schema, &json!({"children": 0})),
        "contact children must be an array"
    );
}

#[test]
fn test_shape_failure_still_runs_container_rules() {
    let schema = Schema::array()
        .named("tags")
        .array_rule(FnRule::new(|v| !v.is_string()).reason("must not be text"));

    let messages: Vec<_> = schema.errors(&json!("a,b")).iter().map(|e| e.message()).collect();
    assert_eq!(messages, vec!["tags must be an array", "tags must not be text"]);

    let errors = schema.errors_with(&json!("a,b"), &EvalOptions::new().short_circuit(true));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].reason, "must be an array");
}

#[test]
fn test_elements_are_one_based_and_ordered() {
    let schema = Schema::array()
        .named("friends")
        .field("name", vec![rule::required(), rule::min_len(3)]);

    let value = json!([{"name": "Al"}, {"name": "Alice"}, {}, {"name": "Bo"}]);
    let messages: Vec<_> = schema.errors(&value).iter().map(|e| e.message()).collect();
    assert_eq!(
        messages,
        vec![
            "friends #1 name must be a minimum of 3 long",
            "friends #3 name is required",
            "friends #4 name must be a minimum of 3 long",
        ]
    );
}

#[test]
fn test_short_circuit_stops_at_first_element() {
    let schema = Schema::array().named("friends").field("name", rule::required());

    let errors = schema.errors_with(
        &json!([{"name": "a"}, {}, {}]),
        &EvalOptions::new().short_circuit(true),
    );
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message(), "friends #2 name is required");
}

#[test]
fn test_nested_arrays() {
    let schema = Schema::item().named("grid").field(
        "rows",
        Schema::array().field("cells", Schema::array().rule(rule::number())),
    );

    let errors = schema.errors(&json!({"rows": [{"cells": [1, 2]}, {"cells": [3, "x"]}]}));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message(), "grid rows #2 cells #2 must be a number");
}
