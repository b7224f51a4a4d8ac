//! Request envelope parsing and payload access.
//!
//! Every request carries `{version, developer, data?}`. The version and
//! developer are checked before anything else happens; a request that
//! fails either check never reaches endpoint resolution.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ApiError;

/// The only protocol version accepted.
pub const API_VERSION: &str = "1.0.0";

/// Contract violations. These abort the request; the transport decides
/// how to report them.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("request is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("developer contact is required")]
    MissingDeveloper,

    #[error("unsupported api version '{found}', expected '{expected}'")]
    UnsupportedVersion {
        found: String,
        expected: &'static str,
    },
}

#[derive(Deserialize)]
struct RawRequest {
    version: Option<String>,
    developer: Option<String>,
    #[serde(default)]
    data: Option<Map<String, Value>>,
}

/// A request that passed the contract check.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub version: String,
    pub developer: String,
    pub data: RequestData,
}

/// Decode and validate a request body.
pub fn parse_request(bytes: &[u8]) -> Result<ApiRequest, RequestError> {
    let raw: RawRequest = serde_json::from_slice(bytes)?;

    let developer = match raw.developer {
        Some(d) if !d.trim().is_empty() => d,
        _ => return Err(RequestError::MissingDeveloper),
    };

    let version = raw.version.unwrap_or_default();
    if version != API_VERSION {
        return Err(RequestError::UnsupportedVersion {
            found: version,
            expected: API_VERSION,
        });
    }

    Ok(ApiRequest {
        version,
        developer,
        data: RequestData::new(raw.data.unwrap_or_default()),
    })
}

/// The optional `data` object of a request.
///
/// A JSON `null` field is treated the same as a missing one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestData(Map<String, Value>);

impl RequestData {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// Explicit entity id, if the caller supplied one.
    pub fn id(&self) -> Result<Option<i64>, ApiError> {
        self.optional_i64("id")
    }

    pub fn optional_i64(&self, key: &'static str) -> Result<Option<i64>, ApiError> {
        match self.get(key) {
            None => Ok(None),
            Some(v) => v
                .as_i64()
                .map(Some)
                .ok_or_else(|| ApiError::invalid(key, "expected an integer")),
        }
    }

    pub fn require_i64(&self, key: &'static str) -> Result<i64, ApiError> {
        self.optional_i64(key)?.ok_or(ApiError::MissingField(key))
    }

    pub fn require_f64(&self, key: &'static str) -> Result<f64, ApiError> {
        let value = self.get(key).ok_or(ApiError::MissingField(key))?;
        value
            .as_f64()
            .ok_or_else(|| ApiError::invalid(key, "expected a number"))
    }

    pub fn require_str(&self, key: &'static str) -> Result<&str, ApiError> {
        let value = self.get(key).ok_or(ApiError::MissingField(key))?;
        value
            .as_str()
            .ok_or_else(|| ApiError::invalid(key, "expected a string"))
    }

    pub fn require_string_list(&self, key: &'static str) -> Result<Vec<String>, ApiError> {
        let value = self.get(key).ok_or(ApiError::MissingField(key))?;
        let items = value
            .as_array()
            .ok_or_else(|| ApiError::invalid(key, "expected an array of strings"))?;
        items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| ApiError::invalid(key, "expected an array of strings"))
            })
            .collect()
    }
}

impl From<Value> for RequestData {
    /// Non-object values become empty data.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Vec<u8> {
        serde_json::to_vec(&value).unwrap()
    }

    #[test]
    fn parses_valid_request() {
        let request = parse_request(&body(json!({
            "version": API_VERSION,
            "developer": "dev@example.com",
            "data": {"id": 5}
        })))
        .unwrap();
        assert_eq!(request.developer, "dev@example.com");
        assert_eq!(request.data.id().unwrap(), Some(5));
    }

    #[test]
    fn data_may_be_absent_or_null() {
        let request = parse_request(&body(json!({
            "version": API_VERSION,
            "developer": "dev"
        })))
        .unwrap();
        assert_eq!(request.data, RequestData::default());

        let request = parse_request(&body(json!({
            "version": API_VERSION,
            "developer": "dev",
            "data": null
        })))
        .unwrap();
        assert_eq!(request.data.id().unwrap(), None);
    }

    #[test]
    fn missing_developer_is_rejected() {
        let err = parse_request(&body(json!({"version": API_VERSION}))).unwrap_err();
        assert!(matches!(err, RequestError::MissingDeveloper));

        let err = parse_request(&body(json!({"version": API_VERSION, "developer": ""})))
            .unwrap_err();
        assert!(matches!(err, RequestError::MissingDeveloper));

        let err = parse_request(&body(json!({"version": API_VERSION, "developer": null})))
            .unwrap_err();
        assert!(matches!(err, RequestError::MissingDeveloper));
    }

    #[test]
    fn wrong_version_is_rejected() {
        let err = parse_request(&body(json!({"version": "0.0.3", "developer": "dev"})))
            .unwrap_err();
        match err {
            RequestError::UnsupportedVersion { found, expected } => {
                assert_eq!(found, "0.0.3");
                assert_eq!(expected, API_VERSION);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_version_is_rejected_as_unsupported() {
        let err = parse_request(&body(json!({"developer": "dev"}))).unwrap_err();
        assert!(matches!(err, RequestError::UnsupportedVersion { .. }));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = parse_request(b"{\"version\": ").unwrap_err();
        assert!(matches!(err, RequestError::InvalidJson(_)));

        let err = parse_request(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, RequestError::InvalidJson(_)));
    }

    #[test]
    fn typed_accessors() {
        let data = RequestData::from(json!({
            "rating": 3,
            "pitch": 1.5,
            "text": "hola",
            "tags": ["a", "b"],
            "bad": "x",
            "nothing": null
        }));
        assert_eq!(data.require_i64("rating").unwrap(), 3);
        assert_eq!(data.require_f64("pitch").unwrap(), 1.5);
        assert_eq!(data.require_f64("rating").unwrap(), 3.0);
        assert_eq!(data.require_str("text").unwrap(), "hola");
        assert_eq!(data.require_string_list("tags").unwrap(), vec!["a", "b"]);
        assert_eq!(
            data.require_i64("missing").unwrap_err(),
            ApiError::MissingField("missing")
        );
        assert_eq!(
            data.require_i64("nothing").unwrap_err(),
            ApiError::MissingField("nothing")
        );
        assert!(matches!(
            data.require_i64("bad").unwrap_err(),
            ApiError::InvalidParameter { field: "bad", .. }
        ));
        assert!(matches!(
            data.require_string_list("text").unwrap_err(),
            ApiError::InvalidParameter { field: "text", .. }
        ));
    }

    #[test]
    fn non_object_data_is_empty() {
        assert_eq!(RequestData::from(json!([1, 2])), RequestData::default());
    }
}
