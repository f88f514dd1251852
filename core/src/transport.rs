//! Blocking `Transport` backed by a `ureq::Agent`.

use ureq::typestate::{WithBody, WithoutBody};
use ureq::{Agent, RequestBuilder};

use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};

/// Largest success body read off the wire.
pub const MAX_BODY_BYTES: u64 = 64 * 1024 * 1024;

/// Executes requests on the calling thread.
///
/// Status codes are returned as data rather than `Err`, so only calls that
/// never produced a response surface as `ureq::Error`. `RequestMode` is a
/// browser concept and has no effect here.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing agent. It should be configured with
    /// `http_status_as_error(false)`.
    pub fn with_agent(agent: Agent) -> Self {
        Self { agent }
    }
}

fn apply_headers<B>(mut builder: RequestBuilder<B>, request: &HttpRequest) -> RequestBuilder<B> {
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn bodiless(
    builder: RequestBuilder<WithoutBody>,
    request: &HttpRequest,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    let builder = apply_headers(builder, request);
    match &request.body {
        Some(body) => builder.force_send_body().send(body.as_bytes()),
        None => builder.call(),
    }
}

fn with_payload(
    builder: RequestBuilder<WithBody>,
    request: &HttpRequest,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    let builder = apply_headers(builder, request);
    match &request.body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}

impl Transport for UreqTransport {
    type Error = ureq::Error;

    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ureq::Error> {
        let url = request.url.as_str();
        let mut response = match request.method {
            HttpMethod::Get => bodiless(self.agent.get(url), request),
            HttpMethod::Delete => bodiless(self.agent.delete(url), request),
            HttpMethod::Head => bodiless(self.agent.head(url), request),
            HttpMethod::Options => bodiless(self.agent.options(url), request),
            HttpMethod::Post => with_payload(self.agent.post(url), request),
            HttpMethod::Put => with_payload(self.agent.put(url), request),
            HttpMethod::Patch => with_payload(self.agent.patch(url), request),
        }?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect();
        // Failure bodies are never inspected, so leave them on the wire.
        // Bytes are passed through as-is; the client judges whether they are JSON.
        let body = if (200..300).contains(&status) && request.method != HttpMethod::Head {
            response
                .body_mut()
                .with_config()
                .limit(MAX_BODY_BYTES)
                .read_to_vec()?
        } else {
            Vec::new()
        };

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
