//! Response envelope normalization.
//!
//! Every gateway reply is an envelope `{status, data?, errors?}`. Failure
//! payloads come in several shapes (`{"reason": "X"}`, `["X"]`, missing), so
//! reason extraction walks a fixed fallback chain and never fails on a
//! missing key.

use serde_json::{Map, Value};

use crate::constants::{
    DATA, ERRORS, REASON, STATUS, STATUS_FAIL, STATUS_OK, UNKNOWN_REASON, UNKNOWN_STATUS,
};
use crate::error::MethodResponseFail;

/// Classifies a decoded envelope.
///
/// Returns the `data` payload as-is for `status: "Ok"` (an empty object when
/// `data` is absent).
///
/// # Errors
///
/// Returns [`MethodResponseFail`] with:
/// - the extracted reason for `status: "Fail"`, or `UNKNOWN_REASON` when no
///   reason can be found;
/// - `UNKNOWN_STATUS` when `status` is missing or has any other value.
pub fn parse_response(response: &Value) -> Result<Value, MethodResponseFail> {
    match response.get(STATUS).and_then(Value::as_str) {
        Some(STATUS_OK) => Ok(response
            .get(DATA)
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()))),
        Some(STATUS_FAIL) => Err(MethodResponseFail::new(fail_reason(response.get(ERRORS)))),
        _ => Err(MethodResponseFail::new(UNKNOWN_STATUS)),
    }
}

/// Derives the reason text from the `errors` member of a `Fail` envelope.
fn fail_reason(errors: Option<&Value>) -> String {
    let first = match errors {
        None | Some(Value::Null) => None,
        Some(Value::Object(map)) => map.get(REASON).or_else(|| map.values().next()),
        // TODO: drop the positional fallback once the gateway settles on the `{reason}` shape.
        Some(Value::Array(items)) => items.first(),
        Some(scalar) => Some(scalar),
    };
    first
        .filter(|value| !value.is_null())
        .map_or_else(|| UNKNOWN_REASON.to_owned(), reason_text)
}

fn reason_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
