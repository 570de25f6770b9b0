//! Client-side state container for the todo API.
//!
//! # Overview
//! [`TodoStore`] mirrors the server's todo collection in memory, proxies
//! create/read/update/delete/toggle operations to the HTTP API, and derives
//! completed/pending views and counts for display.
//!
//! # Design
//! - `TodoClient` is stateless: it builds `HttpRequest` values and parses
//!   `HttpResponse` values without touching the network (host-does-IO).
//! - A `Transport` executes the round-trip. `ReqwestTransport` is the
//!   default; tests script their own.
//! - `TodoStore` sits on top and never surfaces an error to its caller:
//!   failures become an error message plus a `false`/`None` return.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod store;
pub mod transport;
pub mod types;

pub use client::TodoClient;
pub use config::StoreConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use store::TodoStore;
#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
pub use transport::Transport;
pub use types::{ApiErrorResponse, ApiResponse, CreateTodo, Todo, UpdateTodo};
