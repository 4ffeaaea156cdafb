#![allow(dead_code)]

use jqx_adapter::{DescribeShape, Fallback, Shape, infer_output, infer_shape};
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

#[derive(DescribeShape)]
struct User {
    name: String,
}

#[derive(DescribeShape)]
struct Item {
    id: f64,
}

#[derive(DescribeShape)]
struct Input {
    user: User,
    list: Vec<Item>,
}

#[derive(DescribeShape, Serialize)]
#[serde(rename_all = "camelCase")]
struct Profile {
    display_name: String,
    #[serde(rename = "mail")]
    email_address: Option<String>,
    #[serde(skip)]
    session_token: String,
    r#type: Kind,
    settings: HashMap<String, bool>,
    extra: Value,
}

#[derive(DescribeShape, Serialize)]
enum Kind {
    Admin,
    Member,
}

#[derive(DescribeShape)]
struct UserId(u64);

#[derive(DescribeShape)]
#[serde(transparent)]
struct Tags {
    inner: Vec<String>,
}

#[derive(DescribeShape)]
struct Page<T> {
    items: Vec<T>,
    next: Option<String>,
}

#[test]
fn test_identity_returns_input_shape() {
    assert_eq!(infer_output::<Input>(".", Fallback::Unknown), Input::shape());
    assert_eq!(infer_output::<Input>("  .  ", Fallback::Json), Input::shape());
}

#[test]
fn test_field_path_narrows_to_field_type() {
    assert_eq!(infer_output::<Input>(".user.name", Fallback::Unknown), Shape::String);
    assert_eq!(
        infer_output::<Input>(".user", Fallback::Unknown),
        Shape::object([("name", Shape::String)])
    );
}

#[test]
fn test_iteration_yields_element_type() {
    let item = Shape::object([("id", Shape::Number)]);
    assert_eq!(infer_output::<Input>(".list[]", Fallback::Unknown), item);
    assert_eq!(infer_output::<Input>(".list[0]", Fallback::Unknown), item);
    assert_eq!(infer_output::<Input>(".list[]", Fallback::Json), item);
    assert_eq!(infer_output::<Input>(".list[12].id", Fallback::Unknown), Shape::Number);
    assert_eq!(infer_output::<Vec<Input>>(".[].user.name", Fallback::Unknown), Shape::String);
}

#[test]
fn test_unsupported_syntax_uses_fallback() {
    assert_eq!(infer_output::<Input>(".user | .name", Fallback::Unknown), Shape::Unknown);
    assert_eq!(infer_output::<Input>(".user | .name", Fallback::Json), Shape::Json);
    assert_eq!(infer_output::<Input>(".list | length", Fallback::Unknown), Shape::Unknown);
    assert_eq!(infer_output::<Input>(".user.name?", Fallback::Json), Shape::Json);
    assert_eq!(infer_output::<Input>(".[\"user\"]", Fallback::Unknown), Shape::Unknown);
}

#[test]
fn test_unknown_fields_and_wrong_kinds_use_fallback() {
    assert_eq!(infer_output::<Input>(".nope", Fallback::Unknown), Shape::Unknown);
    assert_eq!(infer_output::<Input>(".user[]", Fallback::Json), Shape::Json);
    assert_eq!(infer_output::<Input>(".list.id", Fallback::Unknown), Shape::Unknown);
    assert_eq!(infer_output::<Input>(".user.name.first", Fallback::Json), Shape::Json);
}

#[test]
fn test_derive_follows_serde_names() {
    let shape = Profile::shape();
    assert_eq!(shape.field("displayName"), Some(&Shape::String));
    assert_eq!(shape.field("mail"), Some(&Shape::optional(Shape::String)));
    assert_eq!(shape.field("sessionToken"), None);
    assert_eq!(shape.field("type"), Some(&Shape::String));
    assert_eq!(shape.field("extra"), Some(&Shape::Json));

    assert_eq!(infer_output::<Profile>(".settings.dark", Fallback::Unknown), Shape::Bool);
    assert_eq!(infer_output::<Profile>(".mail", Fallback::Unknown), Shape::optional(Shape::String));
    // nullable values cannot be narrowed further
    assert_eq!(infer_output::<Profile>(".mail.x", Fallback::Json), Shape::Json);
    // any JSON value cannot be narrowed either
    assert_eq!(infer_output::<Profile>(".extra.a", Fallback::Unknown), Shape::Unknown);
}

#[derive(DescribeShape, Serialize)]
#[serde(rename_all = "lowercase")]
#[allow(non_snake_case)]
struct LegacyRow {
    userId: u32,
    created_at: String,
}

#[test]
fn test_lowercase_rule_matches_serde_keys() {
    let row = LegacyRow {
        userId: 1,
        created_at: "today".into(),
    };
    let keys: Vec<String> = match serde_json::to_value(&row).unwrap() {
        Value::Object(map) => map.keys().cloned().collect(),
        other => panic!("unexpected value: {other}"),
    };

    let shape = LegacyRow::shape();
    for key in &keys {
        assert!(shape.field(key).is_some(), "missing {key}");
    }
    assert_eq!(shape.field("userId"), Some(&Shape::Number));
    assert_eq!(shape.field("created_at"), Some(&Shape::String));
}

#[test]
fn test_newtypes_generics_and_maps() {
    assert_eq!(UserId::shape(), Shape::Number);
    assert_eq!(Tags::shape(), Shape::array(Shape::String));
    assert_eq!(infer_output::<Page<Item>>(".items[].id", Fallback::Unknown), Shape::Number);
    assert_eq!(
        infer_output::<BTreeMap<String, Vec<UserId>>>(".anyone[0]", Fallback::Unknown),
        Shape::Number
    );
}

#[test]
fn test_infer_shape_on_hand_built_shapes() {
    let shape = Shape::object([("rows", Shape::array(Shape::array(Shape::Bool)))]);
    assert_eq!(infer_shape(&shape, ".rows[][]", Fallback::Unknown), Shape::Bool);
    assert_eq!(infer_shape(&shape, ".rows[][][]", Fallback::Json), Shape::Json);
}
