use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Uniform response envelope sent back to web content.
///
/// `value` and `error` are omitted from the JSON when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    /// Success carrying a value.
    pub fn ok(value: impl Into<Value>) -> Self {
        Self {
            success: true,
            value: Some(value.into()),
            error: None,
        }
    }

    /// Success for an endpoint without a return value.
    pub fn empty() -> Self {
        Self {
            success: true,
            value: None,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            value: None,
            error: Some(error.into()),
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).unwrap_or_else(|e| {
            format!(r#"{{"success":false,"error":"failed to serialize response: {e}"}}"#)
                .into_bytes()
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

/// Outcome of routing a request that passed the contract check.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    Response(ApiResponse),
    /// The path named no endpoint. The transport decides how to surface it.
    NoSuchEndpoint,
}

impl Dispatch {
    pub fn response(&self) -> Option<&ApiResponse> {
        match self {
            Dispatch::Response(r) => Some(r),
            Dispatch::NoSuchEndpoint => None,
        }
    }

    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            Dispatch::Response(r) => Some(r.to_bytes()),
            Dispatch::NoSuchEndpoint => None,
        }
    }
}
