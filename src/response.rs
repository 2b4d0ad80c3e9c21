use reqwest::StatusCode;
use serde_json::{Map, Value};

use crate::errors::Error;

/// Shape of a response body before it is collapsed for callers.
#[derive(Clone, Debug, PartialEq)]
pub enum ResponseBody {
    Empty,
    Json(Value),
    RawText(String),
}

impl ResponseBody {
    pub fn from_text(text: &str) -> Self {
        if text.is_empty() {
            return ResponseBody::Empty;
        }
        match serde_json::from_str::<Value>(text) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::RawText(text.to_string()),
        }
    }

    /// `Empty` becomes `{}`, raw text becomes `{"message": text}`.
    pub fn into_value(self) -> Value {
        match self {
            ResponseBody::Empty => Value::Object(Map::new()),
            ResponseBody::Json(value) => value,
            ResponseBody::RawText(text) => {
                let mut map = Map::new();
                map.insert("message".to_string(), Value::String(text));
                Value::Object(map)
            }
        }
    }
}

/// Normalizes a non-auth response given its status and body text.
pub fn normalize_body(status: StatusCode, text: &str) -> Result<Value, Error> {
    if status.is_success() {
        return Ok(ResponseBody::from_text(text).into_value());
    }
    Err(error_from_body(status, text))
}

/// Error for a non-2xx response: a JSON `message` (or `error`) wins, then the
/// raw text, then a generic `Error <status>`.
pub fn error_from_body(status: StatusCode, text: &str) -> Error {
    if let ResponseBody::Json(value) = ResponseBody::from_text(text)
        && let Some(message) = structured_message(&value)
    {
        return Error::Server {
            status,
            message: message.to_string(),
        };
    }
    let message = if text.is_empty() {
        format!("Error {}", status.as_u16())
    } else {
        text.to_string()
    };
    Error::Http { status, message }
}

fn structured_message(value: &Value) -> Option<&str> {
    let object = value.as_object()?;
    ["message", "error"]
        .iter()
        .find_map(|key| object.get(*key).and_then(Value::as_str))
}
