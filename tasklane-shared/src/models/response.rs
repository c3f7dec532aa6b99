/// Uniform API response envelope
///
/// Every HTTP response body, success or failure, is wrapped in the same
/// envelope so clients can always branch on `success` first. Absent fields
/// are omitted from the JSON rather than serialized as null.

use serde::{Deserialize, Serialize};

/// The response envelope.
///
/// - Success: `{"success": true, "data": ..., "message": "..."}` where
///   `message` only appears on mutations.
/// - Failure: `{"success": false, "error": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Creates a success envelope carrying `data`.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            error: None,
        }
    }

    /// Creates a success envelope carrying `data` and a human-readable message.
    pub fn ok_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// Creates a success envelope with a message and no data.
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
            error: None,
        }
    }

    /// Creates a failure envelope.
    pub fn error(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            data: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_omits_error() {
        let envelope = ApiResponse::ok(vec![1, 2, 3]);
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["data"], serde_json::json!([1, 2, 3]));
        assert!(value.get("error").is_none());
        assert!(value.get("message").is_none());
    }

    #[test]
    fn test_message_envelope() {
        let envelope = ApiResponse::ok_with_message("Task created successfully", 42);
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["message"], "Task created successfully");
        assert_eq!(value["data"], 42);
    }

    #[test]
    fn test_error_envelope_omits_data() {
        let envelope = ApiResponse::error("Task not found");
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "Task not found");
        assert!(value.get("data").is_none());
    }
}
