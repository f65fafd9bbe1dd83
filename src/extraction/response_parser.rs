use super::types::{ExtractedArguments, ExtractionError};
use tracing::debug;

/// Parse a response body into JSON, unwrapping one level of string encoding.
/// Some service endpoints return `json.dumps(...)` output, i.e. a JSON string holding the payload.
fn parse_payload(body: &str) -> Result<serde_json::Value, ExtractionError> {
    let value = serde_json::from_str::<serde_json::Value>(body)
        .map_err(|e| ExtractionError::Decode(e.to_string()))?;
    match value {
        serde_json::Value::String(inner) => serde_json::from_str(&inner)
            .map_err(|e| ExtractionError::Decode(format!("string-encoded payload: {e}"))),
        other => Ok(other),
    }
}

/// Parse the function selection body into candidate names, preserving order.
/// `null` and `[]` both mean no function was recognized.
pub fn parse_selection_response(body: &str) -> Result<Vec<String>, ExtractionError> {
    let names = match parse_payload(body)? {
        serde_json::Value::Null => Vec::new(),
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::String(name) => Ok(name),
                other => Err(ExtractionError::Decode(format!(
                    "expected function name string, got {other}"
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?,
        other => {
            return Err(ExtractionError::Decode(format!(
                "expected array of function names, got {other}"
            )));
        }
    };

    debug!(candidates = ?names, "Parsed function selection response");
    Ok(names)
}

/// Parse the argument extraction body into per-function entries.
pub fn parse_arguments_response(body: &str) -> Result<ExtractedArguments, ExtractionError> {
    let extracted = match parse_payload(body)? {
        serde_json::Value::Null => ExtractedArguments::default(),
        serde_json::Value::Object(map) => ExtractedArguments::new(map.into_iter().collect()),
        other => {
            return Err(ExtractionError::Decode(format!(
                "expected object keyed by function name, got {other}"
            )));
        }
    };

    debug!(functions = extracted.len(), "Parsed argument extraction response");
    Ok(extracted)
}

/// Reject non-2xx responses before decoding.
pub fn check_http_status(status: u16, body: &str) -> Result<(), ExtractionError> {
    if !(200..300).contains(&status) {
        return Err(ExtractionError::HttpStatus {
            status,
            body: body.to_string(),
        });
    }
    Ok(())
}
