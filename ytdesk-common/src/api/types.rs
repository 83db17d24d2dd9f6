//! Response envelope
//!
//! Every endpoint answers with `{ success, data?, message? }`, errors included.

use serde::{Deserialize, Serialize};

/// Response header naming the error kind on failed responses
///
/// Values: `validation`, `not_found`, `remote_api`. Lets a client tell an
/// upstream 400 apart from a local validation failure.
pub const ERROR_KIND_HEADER: &str = "x-ytdesk-error";

/// Uniform response wrapper
///
/// # Examples
///
/// ```
/// use ytdesk_common::api::Envelope;
///
/// let ok = Envelope::ok(vec![1, 2, 3]);
/// assert!(ok.success);
///
/// let err: Envelope<()> = Envelope::error("Note not found");
/// assert!(!err.success);
/// assert_eq!(err.message.as_deref(), Some("Note not found"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Successful response carrying `data`
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Successful response carrying `data` and a human-readable message
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }

    /// Failed response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

impl Envelope<()> {
    /// Successful response without a payload (e.g. DELETE)
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_serialization_omits_message() {
        let json = serde_json::to_value(Envelope::ok("x")).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true, "data": "x" }));
    }

    #[test]
    fn test_error_serialization_omits_data() {
        let json = serde_json::to_value(Envelope::<u32>::error("boom")).unwrap();
        assert_eq!(json, serde_json::json!({ "success": false, "message": "boom" }));
    }

    #[test]
    fn test_done_deserializes_without_data() {
        let env: Envelope<serde_json::Value> =
            serde_json::from_str(r#"{"success":true,"message":"Note deleted successfully"}"#).unwrap();
        assert!(env.success);
        assert!(env.data.is_none());
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Payload {
        id: String,
    }

    fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Envelope<T> {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_decodes_payload_without_default() {
        let env: Envelope<Payload> = decode(r#"{"success":true,"data":{"id":"n1"}}"#);
        assert_eq!(env.data, Some(Payload { id: "n1".to_string() }));

        let err: Envelope<Payload> = decode(r#"{"success":false,"message":"Note not found"}"#);
        assert!(err.data.is_none());
    }

    #[test]
    fn test_ok_with_message() {
        let env = Envelope::ok_with_message(5, "Comment added successfully");
        assert_eq!(env.data, Some(5));
        assert_eq!(env.message.as_deref(), Some("Comment added successfully"));
    }
}
