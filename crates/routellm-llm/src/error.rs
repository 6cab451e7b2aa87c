use http::StatusCode;
use routellm_core::HttpError;
use routellm_ledger::LedgerError;
use thiserror::Error;

use crate::provider::BackendError;

/// Errors returned to callers of the gateway
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Prompt was empty or whitespace only
    #[error("prompt cannot be empty")]
    EmptyPrompt,

    /// Request body could not be parsed
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// Route request presented a key the ledger does not know
    #[error("invalid subscription key")]
    UnknownAccount,

    /// Status query for a key the ledger does not know
    #[error("subscription key not found")]
    AccountNotFound,

    /// Account has consumed its allowance
    #[error("usage limit reached: used {used}/{limit} tokens")]
    QuotaExceeded {
        /// Tokens consumed so far
        used: u64,
        /// Token ceiling
        limit: u64,
    },

    /// Upstream backend failed, timed out, or returned a non-success status
    #[error("upstream error: {detail}")]
    Upstream {
        /// HTTP status from the backend, if one was received
        status: Option<u16>,
        /// Failure description
        detail: String,
    },

    /// Ledger could not be read
    #[error("ledger unavailable: {0}")]
    LedgerUnavailable(#[source] LedgerError),

    /// Signup email was blank or malformed
    #[error("a valid email address is required")]
    InvalidEmail,

    /// Signup is turned off in configuration
    #[error("signup is disabled")]
    SignupDisabled,
}

impl From<BackendError> for GatewayError {
    fn from(error: BackendError) -> Self {
        Self::Upstream {
            status: error.status(),
            detail: error.to_string(),
        }
    }
}

impl HttpError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::EmptyPrompt | Self::InvalidBody(_) | Self::InvalidEmail => StatusCode::BAD_REQUEST,
            Self::UnknownAccount => StatusCode::UNAUTHORIZED,
            Self::AccountNotFound => StatusCode::NOT_FOUND,
            Self::QuotaExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::Upstream { .. } => StatusCode::BAD_GATEWAY,
            Self::LedgerUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::SignupDisabled => StatusCode::FORBIDDEN,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::EmptyPrompt | Self::InvalidBody(_) | Self::InvalidEmail => "invalid_request_error",
            Self::UnknownAccount => "authentication_error",
            Self::AccountNotFound => "not_found_error",
            Self::QuotaExceeded { .. } => "rate_limit_error",
            Self::Upstream { .. } => "upstream_error",
            Self::LedgerUnavailable(_) => "service_unavailable",
            Self::SignupDisabled => "permission_error",
        }
    }

    fn kind(&self) -> &str {
        match self {
            Self::EmptyPrompt => "EmptyPrompt",
            Self::InvalidBody(_) => "InvalidRequest",
            Self::UnknownAccount => "UnknownAccount",
            Self::AccountNotFound => "AccountNotFound",
            Self::QuotaExceeded { .. } => "QuotaExceeded",
            Self::Upstream { .. } => "UpstreamError",
            Self::LedgerUnavailable(_) => "LedgerUnavailable",
            Self::InvalidEmail => "InvalidEmail",
            Self::SignupDisabled => "SignupDisabled",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::LedgerUnavailable(_) => "usage ledger is temporarily unavailable".to_owned(),
            other => other.to_string(),
        }
    }
}
