//! Externally visible response document.

use serde::{Deserialize, Serialize};

/// Status value for a successfully processed request.
pub const STATUS_PROCESSED: &str = "Processed";

/// Response returned to the caller after a successful upstream call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResponse {
    /// Processing status.
    pub status: String,
    /// Message derived from the upstream payload.
    pub response_message: String,
}

impl ProcessResponse {
    /// Map an upstream payload into the processed response shape.
    ///
    /// Pure transform; no side effects.
    #[must_use]
    pub fn processed(payload: &str) -> Self {
        Self {
            status: STATUS_PROCESSED.to_string(),
            response_message: format!("External Data: {payload}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn processed_maps_payload() {
        let response = ProcessResponse::processed("42");
        assert_eq!(response.status, "Processed");
        assert_eq!(response.response_message, "External Data: 42");
    }

    #[test]
    fn serializes_camel_case() {
        let response = ProcessResponse::processed("42");
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("responseMessage"));
        assert!(json.contains("\"status\":\"Processed\""));
    }
}
