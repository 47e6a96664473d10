use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const PARSE_ERROR: i32 = -32700;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const SERVER_ERROR: i32 = -32000;

/// A request as read off the wire. `method` stays untyped so a missing or
/// non-string method can still be answered as an unknown method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    pub jsonrpc: Option<Value>,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub method: Option<Value>,
    #[serde(default)]
    pub params: Option<Value>,
}

/// A response line; exactly one of `result` and `error` is set.
///
/// `id` is `None` only when no id could be recovered (the key is omitted);
/// `Some(None)` echoes a request that carried none as `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Option<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

impl JsonRpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: Some(id),
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            ..Self::error_without_id(code, message)
        }
    }

    /// An error for input whose id could not be recovered; no `id` key is written.
    pub fn error_without_id(code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: None,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }

    /// Serialize to a single line of JSON.
    pub fn to_line(&self) -> String {
        match serde_json::to_string(self) {
            Ok(line) => line,
            Err(_) => format!(
                r#"{{"jsonrpc":"2.0","error":{{"code":{},"message":"Internal error: failed to encode response"}}}}"#,
                SERVER_ERROR
            ),
        }
    }
}

/// Text payload wrapper used by every tool result.
pub fn text_content(text: impl Into<String>) -> Value {
    serde_json::json!({
        "content": [{
            "type": "text",
            "text": text.into()
        }]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_id_serializes_as_null() {
        let line = JsonRpcResponse::success(None, json!({})).to_line();
        let value: Value = serde_json::from_str(&line).unwrap();

        assert!(value.as_object().unwrap().contains_key("id"));
        assert_eq!(value["id"], Value::Null);
    }

    #[test]
    fn error_response_has_no_result() {
        let line = JsonRpcResponse::error(Some(json!("a")), METHOD_NOT_FOUND, "nope").to_line();
        let value: Value = serde_json::from_str(&line).unwrap();

        assert!(value.get("result").is_none());
        assert_eq!(value["error"]["code"], -32601);
        assert_eq!(value["id"], "a");
    }

    #[test]
    fn unrecoverable_id_is_omitted() {
        let line = JsonRpcResponse::error_without_id(PARSE_ERROR, "Parse error").to_line();
        let value: Value = serde_json::from_str(&line).unwrap();

        assert!(!value.as_object().unwrap().contains_key("id"));
        assert_eq!(value["error"]["code"], -32700);
    }
}
