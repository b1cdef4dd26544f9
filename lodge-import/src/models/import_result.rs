//! Import outcome returned to callers

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Structured outcome of one import call
///
/// Serialized with camelCase keys; absent fields are omitted:
/// - success: `{ success: true, propertyId, message }`
/// - validation failure: `{ success: false, error: "Validation failed", message }`
/// - root insert failure: `{ success: false, error }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ImportResult {
    /// Property created; `message` is the import summary
    pub fn imported(property_id: Uuid, message: String) -> Self {
        Self {
            success: true,
            property_id: Some(property_id),
            error: None,
            message: Some(message),
        }
    }

    /// Nothing was written
    pub fn failed(error: impl Into<String>, message: Option<String>) -> Self {
        Self {
            success: false,
            property_id: None,
            error: Some(error.into()),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_serialization() {
        let id = Uuid::new_v4();
        let json = serde_json::to_value(ImportResult::imported(id, "done".to_string())).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["propertyId"], id.to_string());
        assert_eq!(json["message"], "done");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_root_failure_omits_message_and_id() {
        let json = serde_json::to_value(ImportResult::failed("UNIQUE constraint failed", None)).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "UNIQUE constraint failed");
        assert!(json.get("message").is_none());
        assert!(json.get("propertyId").is_none());
    }
}
