//! Integration tests for decoding model responses

use prompt_variants::{decode, decode_response, VariantContent, VariantId};
use serde_json::{json, Value};

fn as_json(content: &VariantContent) -> Value {
    serde_json::to_value(content).expect("Should serialize")
}

#[test]
fn test_object_array_one_variant_per_element() {
    let response = json!([
        {"title": "One", "variationName": "First"},
        "bare string",
        7,
        null,
        {"title": "Two", "variationName": "Second"}
    ])
    .to_string();

    let variants = decode_response(&response);
    let contents: Vec<_> = variants.iter().map(|v| as_json(&v.content)).collect();
    assert_eq!(
        contents,
        vec![
            json!({"title": "One", "variationName": "First"}),
            json!("bare string"),
            json!("7"),
            json!("null"),
            json!({"title": "Two", "variationName": "Second"}),
        ]
    );
}

#[test]
fn test_truncated_stream_keeps_prior_elements() {
    let variants = decode_response(r#"[{"Title":"A"},{"Title":"B"},{"Tit"#);
    let contents: Vec<_> = variants.iter().map(|v| as_json(&v.content)).collect();
    assert_eq!(contents, vec![json!({"Title": "A"}), json!({"Title": "B"})]);
}

#[test]
fn test_truncated_fixture() {
    let response = include_str!("fixtures/truncated_response.json");
    let variants = decode_response(response);
    assert_eq!(variants.len(), 2);
    let names: Vec<_> = variants
        .iter()
        .filter_map(|v| v.content.as_record())
        .filter_map(|r| r.get("variationName").and_then(Value::as_str))
        .collect();
    assert_eq!(names, vec!["Floral", "Renewal"]);
}

#[test]
fn test_plain_text_is_single_verbatim_variant() {
    let variants = decode_response("plain text, not json");
    assert_eq!(variants.len(), 1);
    assert_eq!(
        variants[0].content,
        VariantContent::Text("plain text, not json".to_string())
    );
}

#[test]
fn test_generator_is_called_once_per_variant() {
    let mut calls = 0;
    let variants = decode(
        || {
            calls += 1;
            VariantId::new()
        },
        r#"["a", "b", "c"]"#,
    );
    assert_eq!(variants.len(), 3);
    assert_eq!(calls, 3);
}

#[test]
fn test_every_decode_gets_fresh_ids() {
    let a = decode_response(r#"{"title":"x"}"#);
    let b = decode_response(r#"{"title":"x"}"#);
    assert_eq!(a.len(), 1);
    assert_eq!(b.len(), 1);
    assert_ne!(a[0].id, b[0].id);
    assert_eq!(a[0].content, b[0].content);
}
