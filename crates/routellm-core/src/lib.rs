//! Shared types for the `RouteLLM` workspace

mod classification;
mod error;

pub use classification::Classification;
pub use error::{ErrorBody, ErrorDetail, HttpError};
