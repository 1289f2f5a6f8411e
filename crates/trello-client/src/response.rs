use serde_json::{json, Value};

/// Parse a response body, wrapping anything that is not JSON as `{"text": body}`.
pub fn normalize_body(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| json!({ "text": body }))
}

/// Human-readable message for a failed response body.
///
/// Objects are serialized as-is; any other JSON value is wrapped as
/// `{"error": value}` first.
pub fn error_message(data: &Value) -> String {
    let wrapped;
    let payload = if data.is_object() {
        data
    } else {
        wrapped = json!({ "error": data });
        &wrapped
    };
    payload.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_body_is_parsed() {
        let value = normalize_body(r#"[{"id":"1"},{"id":"2"}]"#);
        assert_eq!(value[1]["id"], "2");
    }

    #[test]
    fn test_plain_text_is_wrapped() {
        assert_eq!(normalize_body("OK"), json!({ "text": "OK" }));
        assert_eq!(normalize_body(""), json!({ "text": "" }));
    }

    #[test]
    fn test_error_message_for_object() {
        let msg = error_message(&json!({ "message": "not found" }));
        assert_eq!(msg, r#"{"message":"not found"}"#);
    }

    #[test]
    fn test_error_message_wraps_non_objects() {
        let msg = error_message(&json!("invalid id"));
        assert_eq!(msg, r#"{"error":"invalid id"}"#);
    }
}
