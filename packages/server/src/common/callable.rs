//! Callable request envelope: `{"data": <payload>}`

use axum::body::Body;
use serde_json::Value;

/// Largest request body a callable accepts
pub const MAX_CALLABLE_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Buffer a request body, up to `MAX_CALLABLE_BODY_BYTES`, and extract `data`.
pub async fn read_callable_data(body: Body) -> Result<Value, String> {
    let bytes = axum::body::to_bytes(body, MAX_CALLABLE_BODY_BYTES)
        .await
        .map_err(|e| {
            format!(
                "Request body could not be read (limit {} bytes): {}",
                MAX_CALLABLE_BODY_BYTES, e
            )
        })?;
    decode_callable_data(&bytes)
}

/// Extract `data` from a raw callable request body.
///
/// An empty body or a missing `data` key yields `null`, left for the schema
/// to reject. Anything that is not a JSON object is malformed.
pub fn decode_callable_data(body: &[u8]) -> Result<Value, String> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(mut envelope)) => Ok(envelope.remove("data").unwrap_or(Value::Null)),
        Ok(_) => Err("Request body must be a JSON object".to_string()),
        Err(e) => Err(format!("Request body is not valid JSON: {}", e)),
    }
}
