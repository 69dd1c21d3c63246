use crate::error::ApiError;
use serde_json::Value;

/// Helper functions for standardizing error conversions across the codebase.
/// Convert reqwest errors to ApiError with endpoint context
pub fn convert_request_error(error: reqwest::Error, endpoint: &str, timeout_secs: u64) -> ApiError {
    if error.is_timeout() {
        return convert_timeout_error(endpoint, timeout_secs);
    }

    ApiError::Transport {
        endpoint: endpoint.to_string(),
        message: error.to_string(),
    }
}

/// Convert timeout errors to ApiError with endpoint context
pub fn convert_timeout_error(endpoint: &str, timeout_secs: u64) -> ApiError {
    ApiError::Timeout {
        timeout_secs,
        endpoint: endpoint.to_string(),
    }
}

/// Convert body deserialization errors to ApiError with endpoint context
pub fn convert_body_error(error: serde_json::Error, endpoint: &str) -> ApiError {
    ApiError::Protocol {
        endpoint: endpoint.to_string(),
        message: format!("JSON parse error: {}", error),
    }
}

/// Build a protocol error for a response that parsed but lacks what we need
pub fn protocol_error(endpoint: &str, message: impl Into<String>) -> ApiError {
    ApiError::Protocol {
        endpoint: endpoint.to_string(),
        message: message.into(),
    }
}

/// Extract the human-readable message from an error body.
///
/// The server answers failures with `{"errors":[{"msg":"..."}]}`; anything
/// else is returned as-is.
pub fn server_message(body: &str) -> String {
    let messages: Vec<String> = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("errors").and_then(Value::as_array).cloned())
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e.get("msg").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    if messages.is_empty() {
        body.to_string()
    } else {
        messages.join("; ")
    }
}
