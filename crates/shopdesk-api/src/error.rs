//! Normalized API errors

use serde_json::{Map, Value};

/// Result type for gateway operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Uniform failure shape for every gateway call.
///
/// Transport failures carry only `message`. Server failures keep the JSON
/// error body in `fields` and take `message` from it when present, so callers
/// read `.message` without caring where the failure came from.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub status: Option<u16>,
    pub fields: Map<String, Value>,
}

impl ApiError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            fields: Map::new(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::transport(message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::transport(format!("invalid response: {}", message.into()))
    }

    /// Non-2xx response. A JSON object body is kept verbatim; its `message`
    /// field wins over the generic status text.
    pub fn from_status(status: u16, body: Option<Value>) -> Self {
        let fallback = status_message(status);
        match body {
            Some(Value::Object(fields)) => {
                let message = fields
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or(fallback);
                Self {
                    message,
                    status: Some(status),
                    fields,
                }
            }
            _ => Self {
                message: fallback,
                status: Some(status),
                fields: Map::new(),
            },
        }
    }

    /// Whether the backend answered at all.
    pub fn is_server_error(&self) -> bool {
        self.status.is_some()
    }

    /// Server body with `message` filled in, for display and `--json` output.
    pub fn to_value(&self) -> Value {
        let mut body = self.fields.clone();
        body.insert("message".into(), Value::String(self.message.clone()));
        Value::Object(body)
    }
}

pub fn status_message(status: u16) -> String {
    format!("Request failed with status code {}", status)
}

/// Session persistence errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session store io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session store json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        Self::transport(e.to_string())
    }
}
