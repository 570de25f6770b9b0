//! Error types for the todo API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers of `TodoClient`
//! frequently distinguish "the resource does not exist" from "the server
//! returned an unexpected status." All other non-2xx responses land in
//! `Http` with the raw status code and body for debugging.
//!
//! The store above the client does not branch on these variants: every one
//! is reduced to its display text.

use thiserror::Error;

/// Errors produced while building, executing or parsing an API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The request never produced a response (connection refused, reset, ...).
    #[error("transport failed: {0}")]
    Transport(String),

    /// A success envelope arrived without its `data` field.
    #[error("response contained no data")]
    MissingData,
}
