use http::StatusCode;
use serde::Serialize;

/// Error that knows how it is reported over HTTP
///
/// The domain crates implement this; axum only sees the resulting
/// [`ErrorBody`].
pub trait HttpError: std::error::Error {
    fn status_code(&self) -> StatusCode;

    /// Coarse error family (e.g. `invalid_request_error`)
    fn error_type(&self) -> &str;

    /// Stable kind name clients match on (e.g. `QuotaExceeded`)
    fn kind(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String {
        self.to_string()
    }
}

/// JSON envelope shared by every failing endpoint
///
/// Serializes as `{"error": {"message": .., "type": .., "kind": ..}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: String,
    pub kind: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>, error_type: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                message: message.into(),
                error_type: error_type.into(),
                kind: kind.into(),
            },
        }
    }

    pub fn from_error<E: HttpError + ?Sized>(error: &E) -> Self {
        Self::new(error.client_message(), error.error_type(), error.kind())
    }
}
