//! The uniform `{ code, message, data }` response shape of the booking API.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Envelope code the API uses for a successful call.
pub const SUCCESS_CODE: i64 = 200;

/// Code recorded when the `code` field is present but not an integral number.
/// It is never a success code.
pub const UNRECOGNISED_CODE: i64 = i64::MIN;

/// Message shown when a failed envelope carries none.
pub const DEFAULT_FAILURE_MESSAGE: &str = "请求失败";

/// Server response envelope.
///
/// Older API revisions send the human-readable text as `msg`; both spellings
/// decode into [`Envelope::message`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Envelope<T = Value> {
    /// Application status code; [`SUCCESS_CODE`] means success.
    #[serde(deserialize_with = "lenient_code")]
    pub code: i64,
    /// Human-readable status text.
    #[serde(default, alias = "msg", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Payload, present on success.
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Builds a successful envelope around `data`.
    pub fn ok(data: T) -> Self {
        Self { code: SUCCESS_CODE, message: Some("ok".to_owned()), data: Some(data) }
    }

    /// Builds a failed envelope with no payload.
    pub fn failure(code: i64, message: impl Into<String>) -> Self {
        Self { code, message: Some(message.into()), data: None }
    }

    /// Returns `true` when `code` is one of `success_codes`.
    #[must_use]
    pub fn is_success(&self, success_codes: &[i64]) -> bool {
        success_codes.contains(&self.code)
    }

    /// The envelope message, or [`DEFAULT_FAILURE_MESSAGE`] when absent or blank.
    #[must_use]
    pub fn message_or_default(&self) -> &str {
        match self.message.as_deref() {
            Some(m) if !m.trim().is_empty() => m,
            _ => DEFAULT_FAILURE_MESSAGE,
        }
    }
}

impl Envelope<Value> {
    /// Consumes the envelope and returns its payload, `null` when absent.
    #[must_use]
    pub fn into_data(self) -> Value {
        self.data.unwrap_or(Value::Null)
    }
}

/// A decoded structured response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// The body is an envelope (a JSON object with a `code` field).
    Envelope(Envelope),
    /// Any other JSON value, returned to callers untouched.
    Bare(Value),
}

impl Body {
    /// Decodes a response body.
    ///
    /// An empty (or whitespace-only) body decodes to `Bare(null)`.
    ///
    /// # Errors
    /// Returns the JSON error if the bytes are not valid JSON, or if an
    /// object with a `code` field has a `message` that is not a string.
    pub fn parse(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::Bare(Value::Null));
        }
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_value(value)
    }

    /// Classifies an already-parsed JSON value.
    ///
    /// # Errors
    /// Returns the JSON error if an object with a `code` field does not fit
    /// the envelope shape.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        match value {
            Value::Object(ref map) if map.contains_key("code") => {
                serde_json::from_value(value).map(Self::Envelope)
            }
            other => Ok(Self::Bare(other)),
        }
    }
}

/// Reads `code` the way a loosely typed server writes it: integral numbers
/// (including `200.0`) keep their value, anything else maps to
/// [`UNRECOGNISED_CODE`].
#[allow(clippy::cast_possible_truncation)]
fn lenient_code<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let code = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < 9.0e18)
                .map(|f| f as i64)
        }),
        _ => None,
    };
    Ok(code.unwrap_or(UNRECOGNISED_CODE))
}
