//! Synchronous client core for the WordPress REST users endpoint.
//!
//! # Overview
//! Builds the `GET {root}/users` request, hands it to an injected
//! `Transport`, and classifies the response into decoded JSON or a
//! `ClientError` made of `(code, message)` pairs.
//!
//! # Design
//! - `WpClient` holds only immutable configuration and its transport.
//! - The request and response halves (`build_get_users`, `parse_response`)
//!   are usable on their own, so the host can also run the I/O itself.
//! - Response bodies are returned as `serde_json::Value`; no schema is
//!   imposed on users.

pub mod client;
pub mod error;
pub mod http;
pub mod query;
pub mod types;

pub use client::{parse_response, WpClient};
pub use error::{ClientError, ErrorEntry};
pub use http::{HttpRequest, HttpResponse, RequestOptions, Transport, TransportError};
pub use types::{Context, UserQuery};
