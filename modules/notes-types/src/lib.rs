//! Shared types for the notes service and its RPC clients.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =====================================================
// Domain Types
// =====================================================

/// A stored note. Free-form fields, keyed by a string `id`.
///
/// Field order is preserved exactly as written.
pub type Note = Map<String, Value>;

/// The string `id` of a note, if it has one.
pub fn note_id(note: &Note) -> Option<&str> {
    note.get("id").and_then(Value::as_str)
}

// =====================================================
// Response Types
// =====================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn up() -> Self {
        Self {
            status: "UP".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub deleted: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> RpcResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

// =====================================================
// Service Status
// =====================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub running: bool,
    pub uptime_secs: u64,
    pub total_notes: usize,
    pub data_path: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_note_id_requires_string() {
        let note: Note = serde_json::from_value(json!({"id": "n1", "title": "x"})).unwrap();
        assert_eq!(note_id(&note), Some("n1"));

        let numeric: Note = serde_json::from_value(json!({"id": 7})).unwrap();
        assert_eq!(note_id(&numeric), None);

        assert_eq!(note_id(&Note::new()), None);
    }

    #[test]
    fn test_note_preserves_field_order() {
        let raw = r#"{"id":"n1","zeta":1,"alpha":2,"body":"Hello"}"#;
        let note: Note = serde_json::from_str(raw).unwrap();
        assert_eq!(serde_json::to_string(&note).unwrap(), raw);
    }

    #[test]
    fn test_health_and_error_shapes() {
        assert_eq!(
            serde_json::to_value(HealthResponse::up()).unwrap(),
            json!({"status": "UP"})
        );
        assert_eq!(
            serde_json::to_value(RpcResponse::<()>::err("note not found")).unwrap(),
            json!({"success": false, "error": "note not found"})
        );
    }
}
