//! Request orchestration for `RouteLLM`
//!
//! Validates a prompt, authorizes the caller against the usage ledger,
//! enforces the token quota, dispatches to the model picked by the
//! complexity router, and charges the account for the tokens consumed.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod error;
#[cfg(feature = "http")]
pub mod handler;
pub mod orchestrator;
pub mod protocol;
pub mod provider;
pub mod types;

pub use error::GatewayError;
#[cfg(feature = "http")]
pub use handler::{error_response, route_router};
pub use orchestrator::RouteState;
pub use provider::{Backend, BackendError, Completion, OpenRouterBackend};
