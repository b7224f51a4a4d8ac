use crate::response::ApiResponse;

/// Failure reported by a collaborator (collection, speech engine).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },

    #[error("{0}")]
    Failed(String),
}

/// A request that passed the contract check but could not be carried out.
///
/// These become `success: false` responses, never transport errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("there is no card at top of the queue")]
    NoTopCard,

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("invalid value for '{field}': {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("Method was not handled")]
    NotHandled,
}

impl ApiError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ApiError::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }
}

impl From<ApiError> for ApiResponse {
    fn from(err: ApiError) -> Self {
        ApiResponse::failure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            ApiError::NoTopCard.to_string(),
            "there is no card at top of the queue"
        );
        assert_eq!(
            ApiError::MissingField("rating").to_string(),
            "missing required field 'rating'"
        );
        assert_eq!(
            ApiError::invalid("rating", "must be between 1 and 4").to_string(),
            "invalid value for 'rating': must be between 1 and 4"
        );
        assert_eq!(ApiError::NotHandled.to_string(), "Method was not handled");
    }

    #[test]
    fn backend_errors_pass_through() {
        let err: ApiError = BackendError::NotFound {
            kind: "card",
            id: 42,
        }
        .into();
        assert_eq!(err.to_string(), "card 42 not found");
    }

    #[test]
    fn converts_to_failure_response() {
        let response: ApiResponse = ApiError::NotHandled.into();
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("Method was not handled"));
        assert!(response.value.is_none());
    }
}
