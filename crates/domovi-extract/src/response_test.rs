use serde_json::json;

use super::*;

#[test]
fn parses_plain_json() {
    let value = parse_completion(r#"{"a": 1, "b": [true, null]}"#).unwrap();
    assert_eq!(value, json!({"a": 1, "b": [true, null]}));
}

#[test]
fn parses_json_fenced_block_after_preamble() {
    let text = "Here is the data:\n```json\n{\"a\":1}\n```";
    assert_eq!(parse_completion(text).unwrap(), json!({"a": 1}));
}

#[test]
fn parses_untagged_fence() {
    let text = "```\n[1, 2, 3]\n```\nLet me know if you need more.";
    assert_eq!(parse_completion(text).unwrap(), json!([1, 2, 3]));
}

#[test]
fn only_first_fenced_block_is_used() {
    let text = "```json\n{\"first\": true}\n```\n\nand also\n\n```json\n{\"second\": true}\n```";
    assert_eq!(parse_completion(text).unwrap(), json!({"first": true}));
}

#[test]
fn selects_exact_block_interior() {
    let text = "prefix ```json   {\"x\": \"y\"}   ``` suffix";
    assert_eq!(select_json_payload(text), "{\"x\": \"y\"}");
}

#[test]
fn unterminated_fence_falls_back_to_whole_text() {
    let text = "```json\n{\"a\": 1}";
    assert_eq!(select_json_payload(text), text);
    assert!(matches!(
        parse_completion(text),
        Err(ExtractError::MalformedResponse { .. })
    ));
}

#[test]
fn text_without_fence_is_used_whole() {
    let text = "  {\"a\": 1}\n";
    assert_eq!(select_json_payload(text), text);
    assert_eq!(parse_completion(text).unwrap(), json!({"a": 1}));
}

#[test]
fn malformed_response_keeps_raw_text() {
    let text = "Sorry, I could not read the PDF.";
    let err = parse_completion(text).unwrap_err();
    match err {
        ExtractError::MalformedResponse { message, raw } => {
            assert!(!message.is_empty());
            assert_eq!(raw, text);
        }
        other => panic!("expected MalformedResponse, got {other:?}"),
    }
}

#[test]
fn malformed_fenced_response_keeps_full_raw_text_not_just_block() {
    let text = "Result:\n```json\n{\"a\": }\n```";
    let err = parse_completion(text).unwrap_err();
    let rendered = err.to_string();
    assert!(rendered.contains("Result:"), "{rendered}");
    assert!(matches!(err, ExtractError::MalformedResponse { ref raw, .. } if raw == text));
}

#[test]
fn structured_completion_passes_through() {
    let value = json!({"name": "Dom"});
    let parsed = Completion::Structured(value.clone()).into_json().unwrap();
    assert_eq!(parsed, value);
}

#[test]
fn envelope_yields_text_completion() {
    let response: ChatResponse = serde_json::from_value(json!({
        "id": "gen-1",
        "choices": [ { "message": { "role": "assistant", "content": "{}" } } ]
    }))
    .unwrap();
    assert_eq!(
        response.into_completion(),
        Some(Completion::Text("{}".to_string()))
    );
}

#[test]
fn envelope_without_content_yields_none() {
    for body in [
        json!({ "choices": [] }),
        json!({ "choices": [ { "message": { "content": null } } ] }),
        json!({ "choices": [ { "message": { "content": "" } } ] }),
        json!({ "choices": [ {} ] }),
        json!({}),
    ] {
        let response: ChatResponse = serde_json::from_value(body.clone()).unwrap();
        assert!(response.into_completion().is_none(), "{body}");
    }
}
