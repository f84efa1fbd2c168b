//! Request methods and payloads

use crate::error::ApiError;
use serde::Serialize;
use serde_json::{Map, Value};
use shopdesk_core::FormData;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "post" => Ok(Self::Post),
            "put" => Ok(Self::Put),
            "delete" => Ok(Self::Delete),
            other => Err(ApiError::invalid_request(format!("unsupported method: {}", other))),
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(m: Method) -> Self {
        match m {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Request payload: a plain key/value mapping sent as JSON, or a multipart
/// form for uploads. The variant alone decides the encoding.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    Json(Map<String, Value>),
    Multipart(FormData),
}

impl Default for Payload {
    fn default() -> Self {
        Self::Json(Map::new())
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        Self::Json(map)
    }
}

impl From<FormData> for Payload {
    fn from(form: FormData) -> Self {
        Self::Multipart(form)
    }
}

impl Payload {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Serialize any struct into a JSON mapping payload. `null` becomes an
    /// empty mapping; anything other than an object is rejected.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, ApiError> {
        match serde_json::to_value(value)
            .map_err(|e| ApiError::invalid_request(format!("payload not serializable: {}", e)))?
        {
            Value::Object(map) => Ok(Self::Json(map)),
            Value::Null => Ok(Self::empty()),
            _ => Err(ApiError::invalid_request("payload must be a JSON object")),
        }
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self, Self::Multipart(_))
    }

    /// Query-string rendering used for GET. Strings go verbatim, other
    /// scalars by their JSON text, nulls are skipped. Nested values use
    /// bracket keys: `tags[]=a&tags[]=b` for scalar arrays, `filter[min]=1`
    /// for objects, `items[0][id]=x` for arrays holding containers.
    /// Multipart payloads contribute their text fields only.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        match self {
            Self::Json(map) => {
                let mut pairs = Vec::new();
                for (key, value) in map {
                    push_query_pairs(key.clone(), value, &mut pairs);
                }
                pairs
            }
            Self::Multipart(form) => form
                .text_fields()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

fn push_query_pairs(key: String, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::String(s) => out.push((key, s.clone())),
        Value::Array(items) => {
            let indexed = items.iter().any(|i| i.is_array() || i.is_object());
            for (i, item) in items.iter().enumerate() {
                let item_key = if indexed {
                    format!("{}[{}]", key, i)
                } else {
                    format!("{}[]", key)
                };
                push_query_pairs(item_key, item, out);
            }
        }
        Value::Object(map) => {
            for (k, v) in map {
                push_query_pairs(format!("{}[{}]", key, k), v, out);
            }
        }
        other => out.push((key, other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn method_parse_is_case_insensitive() {
        assert_eq!("GET".parse::<Method>().unwrap(), Method::Get);
        assert_eq!("post".parse::<Method>().unwrap(), Method::Post);
        assert_eq!(" Put ".parse::<Method>().unwrap(), Method::Put);
        assert_eq!("DeLeTe".parse::<Method>().unwrap(), Method::Delete);
        assert!("patch".parse::<Method>().is_err());
        assert_eq!(Method::default(), Method::Get);
    }

    #[test]
    fn json_payload_from_struct() {
        #[derive(Serialize)]
        struct Q {
            page: u32,
        }
        let p = Payload::json(&Q { page: 2 }).unwrap();
        assert_eq!(p, Payload::Json(json!({"page": 2}).as_object().unwrap().clone()));
        assert!(Payload::json(&()).unwrap() == Payload::empty());
        assert!(Payload::json(&vec![1, 2]).is_err());
    }

    #[test]
    fn query_pairs_render_scalars() {
        let p = Payload::json(&json!({"q": "hat", "page": 2, "all": true, "skip": null})).unwrap();
        let mut pairs = p.query_pairs();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("all".to_string(), "true".to_string()),
                ("page".to_string(), "2".to_string()),
                ("q".to_string(), "hat".to_string()),
            ]
        );
    }

    #[test]
    fn query_pairs_use_bracket_keys_for_nested_values() {
        let p = Payload::json(&json!({
            "tags": ["a", "b", null],
            "filter": {"min": 1, "max": null},
            "items": [{"id": "x"}]
        }))
        .unwrap();
        let mut pairs = p.query_pairs();
        pairs.sort();
        let expected: Vec<(String, String)> = [
            ("filter[min]", "1"),
            ("items[0][id]", "x"),
            ("tags[]", "a"),
            ("tags[]", "b"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(pairs, expected);
    }
}
