use serde_json::Value;


type ReplyExtractor = fn(&Value) -> Option<String>;

fn _text_of(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        // workers ai in json mode puts a parsed object there
        Value::Object(_) | Value::Array(_) => Some(v.to_string()),
        _ => None,
    }
}

fn _from_response(v: &Value) -> Option<String> {
    v.get("response").and_then(_text_of)
}

fn _from_result_response(v: &Value) -> Option<String> {
    v.get("result").and_then(|r| r.get("response")).and_then(_text_of)
}

fn _from_raw_string(v: &Value) -> Option<String> {
    v.as_str().map(|s| s.to_string())
}

fn _has_response_field(v: &Value) -> bool {
    v.get("response").is_some() || v.pointer("/result/response").is_some()
}

/// A reply that has a `response` field but nothing in it is empty, not something to stringify.
fn _from_whole_value(v: &Value) -> Option<String> {
    if v.is_null() || _has_response_field(v) {
        return None;
    }
    Some(v.to_string())
}

/// Tried in order, first hit wins.
const REPLY_EXTRACTORS: &[(&str, ReplyExtractor)] = &[
    ("response", _from_response),
    ("result.response", _from_result_response),
    ("raw string", _from_raw_string),
    ("stringified", _from_whole_value),
];

/// Returns the extractor name along with the text. Text that is blank is no text.
pub fn extract_reply_text(reply: &Value) -> Result<(&'static str, String), String> {
    let (name, text) = REPLY_EXTRACTORS.iter()
        .find_map(|(name, extractor)| extractor(reply).map(|text| (*name, text)))
        .ok_or_else(|| "AI returned empty response".to_string())?;
    if text.trim().is_empty() {
        return Err("AI returned empty response".to_string());
    }
    Ok((name, text))
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_priority_order() {
        let both = json!({"response": "top", "result": {"response": "nested"}});
        assert_eq!(extract_reply_text(&both).unwrap(), ("response", "top".to_string()));
        let nested = json!({"result": {"response": "nested"}, "success": true});
        assert_eq!(extract_reply_text(&nested).unwrap(), ("result.response", "nested".to_string()));
        let raw = json!("just text");
        assert_eq!(extract_reply_text(&raw).unwrap(), ("raw string", "just text".to_string()));
        let other = json!({"output": [1, 2]});
        assert_eq!(extract_reply_text(&other).unwrap(), ("stringified", r#"{"output":[1,2]}"#.to_string()));
    }

    #[test]
    fn test_empty_response_field_falls_through() {
        let v = json!({"response": "", "result": {"response": "nested"}});
        assert_eq!(extract_reply_text(&v).unwrap().1, "nested");
    }

    #[test]
    fn test_blank_response_field_is_empty_not_stringified() {
        for v in [
            json!({"response": ""}),
            json!({"response": "   "}),
            json!({"response": null}),
            json!({"result": {"response": "\n"}, "success": true}),
        ] {
            assert_eq!(extract_reply_text(&v).unwrap_err(), "AI returned empty response");
        }
        let v = json!({"response": " ", "result": {"response": "nested"}});
        assert_eq!(extract_reply_text(&v).unwrap().1, "nested");
    }

    #[test]
    fn test_object_response_is_serialized() {
        let v = json!({"response": {"topic": "AI", "sections": ["a"]}});
        assert_eq!(extract_reply_text(&v).unwrap().1, r#"{"topic":"AI","sections":["a"]}"#);
    }

    #[test]
    fn test_empty_replies_fail() {
        for v in [json!(""), json!("   \n"), Value::Null] {
            assert_eq!(extract_reply_text(&v).unwrap_err(), "AI returned empty response");
        }
    }
}
