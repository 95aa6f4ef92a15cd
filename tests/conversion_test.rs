//! Integration tests for converting schemas between container shapes.

use rulebound::{predicate, rule, Discipline, Object, Schema};
use serde_json::json;

fn is_string_schema() -> Schema {
    Schema::new(Object::new().with(
        "schema",
        Object::new().with("name", predicate(|v| v.is_string())),
    ))
}

#[test]
fn test_to_array_schema() {
    let schema = is_string_schema();

    assert!(schema.matches(&json!({"name": "Joe"})));
    assert!(!schema.matches(&json!([{"name": "Joe"}])));

    assert!(!schema.to_array_schema().matches(&json!({"name": "Joe"})));
    assert!(schema.to_array_schema().matches(&json!([{"name": "Joe"}])));
}

#[test]
fn test_to_dict_schema() {
    let schema = is_string_schema();

    assert!(schema.matches(&json!({"name": "Joe"})));
    assert!(!schema.matches(&json!({"joe": {"name": "Joe"}})));

    assert!(!schema.to_dict_schema().matches(&json!({"name": "Joe"})));
    assert!(schema.to_dict_schema().matches(&json!({"joe": {"name": "Joe"}})));
}

#[test]
fn test_to_item_schema_from_array() {
    let schema = Schema::new(
        Object::new()
            .with("schema", Object::new().with("name", predicate(|v| v.is_string())))
            .with("isArray", true),
    );

    assert!(!schema.matches(&json!({"name": "Joe"})));
    assert!(schema.matches(&json!([{"name": "Joe"}])));

    assert!(schema.to_item_schema().matches(&json!({"name": "Joe"})));
    assert!(!schema.to_item_schema().matches(&json!([{"name": "Joe"}])));
}

#[test]
fn test_to_item_schema_from_dict() {
    let schema = Schema::new(
        Object::new()
            .with("schema", Object::new().with("name", predicate(|v| v.is_string())))
            .with("isDict", true),
    );

    assert!(!schema.matches(&json!({"name": "Joe"})));
    assert!(schema.matches(&json!({"joe": {"name": "Joe"}})));

    assert!(schema.to_item_schema().matches(&json!({"name": "Joe"})));
    assert!(!schema.to_item_schema().matches(&json!({"joe": {"name": "Joe"}})));
}

#[test]
fn test_conversion_preserves_name_rules_and_children() {
    let person = Schema::item()
        .named("person")
        .rule(rule::FnRule::new(|v| v.get("id").is_some()).reason("needs an id"))
        .field("name", rule::required());

    let people = person.to_array_schema();
    assert_eq!(people.name(), Some("person"));
    assert_eq!(people.discipline(), Discipline::Array);
    assert_eq!(people.rules().len(), 1);
    assert_eq!(people.children().count(), 1);

    let messages: Vec<_> = people
        .errors(&json!([{"id": 1, "name": "Joe"}, {}]))
        .iter()
        .map(|e| e.message())
        .collect();
    assert_eq!(messages, vec!["person #2 needs an id", "person #2 name is required"]);

    assert_eq!(person.discipline(), Discipline::Item);
}

#[test]
fn test_container_rules_survive_round_trip() {
    let list = Schema::array().named("tags").array_rule(rule::max_len(2));

    let item = list.to_item_schema();
    assert!(item.container_rules().is_empty());
    assert!(item.matches(&json!(["a", "b", "c"])));

    let back = item.to_array_schema();
    assert_eq!(back.container_rules().len(), 1);
    assert!(!back.matches(&json!(["a", "b", "c"])));
}
