#![cfg(feature = "schemars")]

use jqx_adapter::schema::{JsonSchema, SchemaFor, typed};
use jqx_adapter::{Adapter, AdapterError, FilterOptions, RuntimeError, runtime_fn};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
struct Order {
    id: u32,
    items: Vec<String>,
}

fn order_schema() -> JsonSchema {
    JsonSchema::new(json!({
        "type": "object",
        "properties": {
            "id": {"type": "integer"},
            "items": {"type": "array", "items": {"type": "string"}}
        },
        "required": ["id", "items"]
    }))
    .unwrap()
}

#[tokio::test]
async fn test_json_schema_input_collects_all_issues() {
    let adapter = Adapter::new(runtime_fn(|_filter, _input| async move {
        Err(RuntimeError::from("runtime must not be called"))
    }));

    let err = adapter
        .filter(FilterOptions::new(
            ".items[]",
            json!({"id": "x", "items": [1, "b", 2]}),
            order_schema(),
            typed::<String>(),
        ))
        .await
        .unwrap_err();

    match err {
        AdapterError::InputValidation { message, issues } => {
            assert_eq!(message, "Input does not match schema");
            let paths: Vec<&str> = issues.iter().map(|issue| issue.path.as_str()).collect();
            assert_eq!(issues.len(), 3, "{paths:?}");
            assert!(paths.contains(&"/id"));
            assert!(paths.contains(&"/items/0"));
            assert!(paths.contains(&"/items/2"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_generated_schema_validates_outputs() {
    let adapter = Adapter::new(runtime_fn(|_filter, _input| async move {
        Ok(vec![
            r#"{"id": 1, "items": ["a"]}"#.to_string(),
            r#"{"id": -1, "items": [true]}"#.to_string(),
        ])
    }));

    let err = adapter
        .filter(FilterOptions::new(
            ".orders[]",
            json!({"orders": []}),
            jqx_adapter::schema::Any,
            SchemaFor::<Order>::new().unwrap(),
        ))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "output_validation");
    assert_eq!(err.index(), Some(1));
    let paths: Vec<&str> = err.issues().iter().map(|issue| issue.path.as_str()).collect();
    assert!(paths.contains(&"/id"), "{paths:?}");
    assert!(paths.contains(&"/items/0"), "{paths:?}");
}

#[tokio::test]
async fn test_mixed_bindings_round_trip() {
    let echo = runtime_fn(|_filter, input| async move { Ok(vec![input]) });
    let adapter = Adapter::new(echo);

    let orders = adapter
        .filter(FilterOptions::new(
            ".",
            json!({"id": 9, "items": ["tea", "cake"]}),
            order_schema(),
            SchemaFor::<Order>::new().unwrap(),
        ))
        .await
        .unwrap();

    assert_eq!(
        orders,
        vec![Order {
            id: 9,
            items: vec!["tea".into(), "cake".into()]
        }]
    );
}
