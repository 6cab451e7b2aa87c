/// Errors returned by ledger implementations
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// HTTP transport or connection error
    #[error("ledger request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Ledger service returned a non-success status
    #[error("ledger API error ({status}): {message}")]
    Api {
        /// HTTP status from the ledger service
        status: u16,
        /// Error message from the response body
        message: String,
    },

    /// Write targeted an account the ledger does not know
    #[error("account not found: {account_key}")]
    AccountNotFound {
        /// Key that failed to resolve
        account_key: String,
    },
}
