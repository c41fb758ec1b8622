//! Client-submitted process request document.

use serde::{Deserialize, Serialize};

use crate::error::ExecuteError;

/// A client request carrying the data to derive the upstream query from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequest {
    /// Client-supplied identifier, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Opaque request payload. Must be non-empty before submission.
    pub request_data: String,
}

impl ProcessRequest {
    /// Create a request without a client-supplied id.
    #[must_use]
    pub fn new(request_data: impl Into<String>) -> Self {
        Self {
            id: None,
            request_data: request_data.into(),
        }
    }

    /// Attach a client-supplied id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Check the non-empty invariant.
    ///
    /// Violated inputs never reach the network layer.
    pub fn validate(&self) -> Result<(), ExecuteError> {
        if self.request_data.is_empty() {
            return Err(ExecuteError::invalid_input("request data cannot be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn valid_request_passes() {
        let request = ProcessRequest::new("sample-query");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn empty_request_is_rejected() {
        let request = ProcessRequest::new("");
        let err = request.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn deserializes_camel_case() {
        let request: ProcessRequest =
            serde_json::from_str(r#"{"id":"req-1","requestData":"sample-query"}"#).unwrap();
        assert_eq!(request.id.as_deref(), Some("req-1"));
        assert_eq!(request.request_data, "sample-query");
    }

    #[test]
    fn id_is_optional() {
        let request: ProcessRequest =
            serde_json::from_str(r#"{"requestData":"sample-query"}"#).unwrap();
        assert!(request.id.is_none());
    }
}
