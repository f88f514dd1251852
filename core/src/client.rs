//! Request builder, transport driver and response classifier.
//!
//! # Design
//! `RequestClient` holds only its `ClientConfig` and carries no mutable
//! state between calls. `send` is split into `build_request` (produces an
//! `HttpRequest`) and `parse_response` (consumes an `HttpResponse`), with a
//! `Transport` executing the round-trip in between. Every failure is logged
//! once where it is detected and then returned to the caller.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::SendError;
use crate::http::{HttpRequest, HttpResponse, RequestMode, Transport};
use crate::types::RequestSpec;

/// Stateless client for the course API.
#[derive(Debug, Clone)]
pub struct RequestClient {
    config: ClientConfig,
}

impl Default for RequestClient {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl RequestClient {
    pub fn new(mut config: ClientConfig) -> Self {
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Base URL and API prefix joined with `path`, verbatim.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}{}", self.config.base_url, self.config.api_prefix, path)
    }

    pub fn build_request(&self, spec: &RequestSpec) -> HttpRequest {
        let token = self.config.session_token.as_ref();
        // A configured session token owns the Cookie header.
        let mut headers: Vec<(String, String)> = self
            .config
            .default_headers
            .iter()
            .filter(|(k, _)| token.is_none() || !k.eq_ignore_ascii_case("cookie"))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        if let Some(token) = token {
            headers.push(("Cookie".to_string(), format!("session={}", token.as_str())));
        }

        HttpRequest {
            method: spec.method,
            url: self.url_for(&spec.path),
            headers,
            // Serializing a `Value` cannot fail.
            body: spec.body.as_ref().map(Value::to_string),
            mode: RequestMode::Cors,
        }
    }

    /// Classify a response: 2xx bodies are parsed as JSON, anything else is
    /// an `HttpStatus` failure and the body is left unread.
    pub fn parse_response<E>(&self, response: HttpResponse) -> Result<Value, SendError<E>> {
        if !response.is_success() {
            return Err(SendError::HttpStatus {
                status: response.status,
            });
        }
        serde_json::from_slice(&response.body).map_err(SendError::Decode)
    }

    /// Issue one request and return its parsed JSON body.
    pub fn send<T>(&self, transport: &T, spec: &RequestSpec) -> Result<Value, SendError<T::Error>>
    where
        T: Transport + ?Sized,
        T::Error: std::fmt::Display,
    {
        let request = self.build_request(spec);
        tracing::debug!(method = %request.method, url = %request.url, "sending request");

        let result = match transport.execute(&request) {
            Ok(response) => self.parse_response(response),
            Err(e) => Err(SendError::Transport(e)),
        };
        if let Err(e) = &result {
            report(&request, e);
        }
        result
    }

    /// `send`, then deserialize the body into `R`.
    pub fn send_as<R, T>(&self, transport: &T, spec: &RequestSpec) -> Result<R, SendError<T::Error>>
    where
        R: DeserializeOwned,
        T: Transport + ?Sized,
        T::Error: std::fmt::Display,
    {
        let value = self.send(transport, spec)?;
        serde_json::from_value(value).map_err(|e| {
            let err = SendError::Decode(e);
            report(&self.build_request(spec), &err);
            err
        })
    }
}

fn report<E: std::fmt::Display>(request: &HttpRequest, error: &SendError<E>) {
    tracing::error!(
        method = %request.method,
        url = %request.url,
        kind = ?error.kind(),
        error = %error,
        "Error during the fetch operation"
    );
}
