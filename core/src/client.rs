//! Users client for the WordPress REST API.
//!
//! # Design
//! `WpClient` holds the REST root, the credential and an injected
//! `Transport`, none of which change after construction. The request side
//! (`build_get_users`) and the response side (`parse_response`) are plain
//! functions over data, so a host can run the I/O itself and still get the
//! same classification `get_users` applies.

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{collect_error_entries, ClientError};
use crate::http::{HttpRequest, HttpResponse, RequestOptions, Transport};
use crate::query::{append_query, encode_query};
use crate::types::UserQuery;

const USERS_PATH: &str = "/users";

/// Client for the `/users` collection.
#[derive(Clone)]
pub struct WpClient<T> {
    base_url: String,
    token: String,
    transport: T,
}

impl<T> std::fmt::Debug for WpClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WpClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl<T> WpClient<T> {
    /// `base_url` is the REST root, e.g. `https://example.com/wp-json`.
    pub fn new(base_url: &str, token: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the GET for one page of users, with the credential merged into
    /// `options`.
    pub fn build_get_users(&self, query: &UserQuery, options: RequestOptions) -> HttpRequest {
        let endpoint = format!("{}{USERS_PATH}", self.base_url);
        let url = append_query(&endpoint, &encode_query(&query.to_params()));
        let auth = RequestOptions::new().header("Authorization", &format!("Basic {}", self.token));
        HttpRequest {
            url,
            options: options.merge(auth),
        }
    }
}

impl<T: Transport> WpClient<T> {
    pub fn get_users(&self, query: &UserQuery) -> Result<Value, ClientError> {
        self.get_users_with_options(query, RequestOptions::default())
    }

    /// Same as `get_users`, with caller-supplied headers and timeout.
    pub fn get_users_with_options(
        &self,
        query: &UserQuery,
        options: RequestOptions,
    ) -> Result<Value, ClientError> {
        let request = self.build_get_users(query, options);
        debug!(url = %request.url, "GET users");
        let response = self.transport.get(&request.url, &request.options).map_err(|err| {
            warn!(url = %request.url, error = %err, "transport failed");
            ClientError::from(err)
        })?;
        parse_response(response)
    }
}

/// Classify a response and decode its body.
///
/// 2xx bodies are returned as decoded JSON. Anything else becomes
/// `ClientError::Api` with the pairs found in the body; a body that is not
/// JSON gives an `Api` error without pairs. A non-JSON content type is
/// reported as `InvalidResponse` whatever the status.
pub fn parse_response(response: HttpResponse) -> Result<Value, ClientError> {
    debug!(status = ?response.status, "users response");
    if response.is_success() {
        return decode_body(&response);
    }

    warn!(status = ?response.status, "request was not successful");
    let errors = match decode_body(&response) {
        Ok(body) => collect_error_entries(&body),
        Err(ClientError::InvalidJson) => Vec::new(),
        Err(err) => return Err(err),
    };
    Err(ClientError::Api {
        status: response.status,
        errors,
    })
}

fn decode_body(response: &HttpResponse) -> Result<Value, ClientError> {
    let is_json = response
        .header("content-type")
        .is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"));
    if !is_json {
        return Err(ClientError::InvalidResponse);
    }
    match serde_json::from_str::<Value>(&response.body) {
        Ok(Value::Null) | Err(_) => Err(ClientError::InvalidJson),
        Ok(value) => Ok(value),
    }
}
