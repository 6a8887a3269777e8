use dot_notation::{DotError, GetMode, PathAccessor};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn default_data() -> Value {
    json!({
        "levelA": {
            "levelB": "someValueB",
            "levelB2": { "levelC2": { "levelD2": "someValueD2" } }
        },
        "levelB": "levelB",
        "level1": { "level2": "someValue2" }
    })
}

fn users(with_email: usize) -> Value {
    let names = ["one", "two", "three", "four", "five"];
    let rows: Vec<Value> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            if i < with_email {
                json!({"id": i + 1, "email": null, "name": name})
            } else {
                json!({"id": i + 1, "name": name})
            }
        })
        .collect();
    json!({"level1": {"level2": {"level3": rows}}})
}

#[test]
fn test_get_wildcard_end_with_wild() {
    let acc = PathAccessor::new(default_data());
    assert_eq!(acc.get("level1.*").unwrap(), json!(["someValue2"]));
}

#[test]
fn test_get_wildcard_default_fill() {
    let acc = PathAccessor::new(default_data());
    assert_eq!(acc.get("*.levelB").unwrap(), json!(["someValueB", null, null]));
}

#[test]
fn test_get_wildcard_only_found() {
    let mut acc = PathAccessor::new(default_data());
    acc.set_get_mode(GetMode::ReturnFound);
    assert_eq!(acc.get("*.levelB").unwrap(), json!(["someValueB"]));
    assert_eq!(acc.get("*.missing").unwrap(), json!([]));
}

#[test]
fn test_get_wildcard_throws_in_exception_mode() {
    let mut acc = PathAccessor::new(default_data());
    acc.set_get_mode(GetMode::ThrowException);
    let err = acc.get_or("*.levelC", json!("noValue")).unwrap_err();
    assert!(matches!(err, DotError::PathNotFound(ref k) if k == "levelC"));
}

#[test]
fn test_get_wild_table() {
    let rows: Vec<Value> = ["a", "b", "c", "d", "e", "f"]
        .iter()
        .map(|v| json!({"value": v, "ontme": 1}))
        .collect();
    let acc = PathAccessor::new(json!({"test": {"test": rows}}));
    assert_eq!(acc.get("test.test.*.value").unwrap(), json!(["a", "b", "c", "d", "e", "f"]));
}

#[test]
fn test_get_nested_wildcards() {
    let acc = PathAccessor::new(json!({
        "teams": [
            {"members": [{"name": "Alice"}, {"name": "Bob"}]},
            {"members": [{"name": "Carol"}]}
        ]
    }));
    assert_eq!(
        acc.get("teams.*.members.*.name").unwrap(),
        json!([["Alice", "Bob"], ["Carol"]])
    );
}

#[test]
fn test_has_wildcard() {
    let acc = PathAccessor::new(default_data());
    assert!(acc.has("*"));
    assert!(acc.has("*.levelB"));
    assert!(acc.has("*.*.*.*"));
    assert!(acc.has("level1.*"));
    assert!(!acc.has("*.*.*.*.*"));
    assert!(!acc.has("level1.level2.*"));
    assert!(!PathAccessor::new(json!({"empty": {}})).has("empty.*"));
}

#[test]
fn test_set_wildcard_for_shallow_path() {
    let mut acc = PathAccessor::new(json!([
        {"id": 1, "name": "one"},
        {"id": 2, "name": "two"},
        {"id": 3, "name": "three"}
    ]));
    acc.set("*.email", Value::Null).unwrap();
    assert_eq!(
        acc.data(),
        &json!([
            {"id": 1, "name": "one", "email": null},
            {"id": 2, "name": "two", "email": null},
            {"id": 3, "name": "three", "email": null}
        ])
    );
}

#[test]
fn test_set_wildcard_for_deep_path() {
    let mut acc = PathAccessor::new(users(0));
    acc.set("level1.level2.level3.*.email", Value::Null).unwrap();
    assert_eq!(acc.data(), &users(5));
}

#[test]
fn test_set_wildcard_over_nothing_is_a_no_op() {
    let mut acc = PathAccessor::new(json!({"list": []}));
    acc.set("list.*.email", "x").unwrap();
    assert_eq!(acc.data(), &json!({"list": []}));
}

#[test]
fn test_set_trailing_wildcard_is_a_plain_key() {
    let mut acc = PathAccessor::new(json!({"flags": {"a": false, "b": false}}));
    acc.set("flags.*", true).unwrap();
    assert_eq!(acc.data(), &json!({"flags": {"a": false, "b": false, "*": true}}));
    assert_eq!(acc.get("flags.a").unwrap(), json!(false));
}

#[test]
fn test_remove_wildcard() {
    let mut acc = PathAccessor::new(users(5));
    acc.remove("level1.level2.level3.*.email").unwrap();
    assert_eq!(acc.data(), &users(0));
}

#[test]
fn test_remove_wildcard_partial_match() {
    let mut acc = PathAccessor::new(users(4));
    acc.remove("level1.level2.level3.*.email").unwrap();
    assert_eq!(acc.data(), &users(0));
}

#[test]
fn test_remove_wildcard_no_match() {
    let mut acc = PathAccessor::new(users(0));
    let err = acc.remove("level1.level2.level3.*.email").unwrap_err();
    match err {
        DotError::PathNotFound(paths) => {
            assert!(paths.starts_with("level1.level2.level3.0.email, "));
            assert_eq!(paths.split(", ").count(), 5);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(acc.data(), &users(0));
}

#[test]
fn test_remove_trailing_wildcard() {
    let mut acc = PathAccessor::new(default_data());
    acc.remove("level1.*").unwrap();
    assert_eq!(acc.get("level1").unwrap(), json!({}));
}

#[test]
fn test_wildcard_with_custom_tokens() {
    let mut acc = PathAccessor::new(users(0));
    acc.set_delimiter("/").set_wildcard("%");
    acc.set("level1/level2/level3/%/active", true).unwrap();
    assert_eq!(
        acc.get("level1/level2/level3/%/active").unwrap(),
        json!([true, true, true, true, true])
    );
    // `*` is an ordinary key now
    assert!(!acc.has("level1/level2/level3/*"));
}
