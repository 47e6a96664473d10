use sandbox_fs_core::OperationError;
use serde_json::Value;
use thiserror::Error;

use crate::transport::{JsonRpcResponse, METHOD_NOT_FOUND, PARSE_ERROR, SERVER_ERROR};

/// Every way a single request can fail, mapped onto a JSON-RPC error code.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Parse error")]
    Parse(#[source] serde_json::Error),
    #[error("Unknown method: {0}")]
    MethodNotFound(String),
    #[error("Unknown tool: {0}")]
    ToolNotFound(String),
    #[error("Tool execution failed: {0}")]
    Operation(#[from] OperationError),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn code(&self) -> i32 {
        match self {
            ServerError::Parse(_) => PARSE_ERROR,
            ServerError::MethodNotFound(_) | ServerError::ToolNotFound(_) => METHOD_NOT_FOUND,
            ServerError::Operation(_) | ServerError::Internal(_) => SERVER_ERROR,
        }
    }

    pub fn into_response(self, id: Option<Value>) -> JsonRpcResponse {
        JsonRpcResponse::error(id, self.code(), self.to_string())
    }

    /// Response for input that yielded no request id at all.
    pub fn into_response_without_id(self) -> JsonRpcResponse {
        JsonRpcResponse::error_without_id(self.code(), self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_taxonomy() {
        let parse = serde_json::from_str::<Value>("{").unwrap_err();

        assert_eq!(ServerError::Parse(parse).code(), -32700);
        assert_eq!(ServerError::MethodNotFound("foo".into()).code(), -32601);
        assert_eq!(ServerError::ToolNotFound("bar".into()).code(), -32601);
        assert_eq!(
            ServerError::Operation(OperationError::AccessDenied("/etc".into())).code(),
            -32000
        );
        assert_eq!(ServerError::Internal("boom".into()).code(), -32000);
    }

    #[test]
    fn operation_message_keeps_cause() {
        let err = ServerError::from(OperationError::NotAFile("/srv/data/docs".into()));
        assert_eq!(
            err.to_string(),
            "Tool execution failed: Not a file: /srv/data/docs"
        );
    }
}
