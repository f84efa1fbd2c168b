//! Typed endpoint outcomes
//!
//! The backend reports application failures in-band as
//! `{"success": false, "message": ...}` on a 2xx response. [`ApiOutcome::decode`]
//! turns that convention into a sum type so callers match instead of probing
//! fields.

use crate::error::{ApiError, ApiResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shopdesk_core::{Category, Product, User};

#[derive(Clone, Debug, PartialEq)]
pub enum ApiOutcome<T> {
    Ok(T),
    Failed { message: String },
}

impl<T: DeserializeOwned> ApiOutcome<T> {
    /// Decode a raw body. `success: false` becomes `Failed`, using the body's
    /// `message` or `fallback`. Bodies without a `success` field are data; an
    /// empty body decodes like `{}`.
    pub fn decode(body: Value, fallback: &str) -> ApiResult<Self> {
        let body = match body {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };
        if body.get("success").and_then(Value::as_bool) == Some(false) {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .unwrap_or(fallback)
                .to_string();
            return Ok(Self::Failed { message });
        }
        serde_json::from_value(body)
            .map(Self::Ok)
            .map_err(|e| ApiError::invalid_response(e.to_string()))
    }
}

impl<T> ApiOutcome<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Self::Ok(v) => Some(v),
            Self::Failed { .. } => None,
        }
    }

    pub fn into_result(self) -> Result<T, String> {
        match self {
            Self::Ok(v) => Ok(v),
            Self::Failed { message } => Err(message),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ApiOutcome<U> {
        match self {
            Self::Ok(v) => ApiOutcome::Ok(f(v)),
            Self::Failed { message } => ApiOutcome::Failed { message },
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Acknowledgement for create/update/delete.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(rename = "loggedUser", default)]
    pub logged_user: Option<User>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryList {
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductList {
    #[serde(default)]
    pub products: Vec<Product>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductDetail {
    pub product: Product,
}
