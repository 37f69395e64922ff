//! Executes `HttpRequest` values.
//!
//! `FaqStore` is generic over `Transport` so tests can script responses and
//! hosts can plug in whatever HTTP stack they already run. `UreqTransport`
//! is the blocking default.

use std::time::Duration;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Performs one HTTP round-trip.
///
/// Non-2xx statuses are returned as data; `Err` means no response arrived.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a `ureq::Agent`.
///
/// Status-code-as-error is disabled so 4xx/5xx bodies reach the parser.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(None)
    }
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (key, value) in headers {
        builder = builder.header(key.as_str(), value.as_str());
    }
    builder
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let path = request.path.as_str();
        let headers = request.headers.as_slice();
        let body = request.body.as_deref();

        let result = match request.method {
            HttpMethod::Get => with_headers(self.agent.get(path), headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(path), headers).call(),
            HttpMethod::Post => {
                let builder = with_headers(self.agent.post(path), headers);
                match body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
            HttpMethod::Put => {
                let builder = with_headers(self.agent.put(path), headers);
                match body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
            HttpMethod::Patch => {
                let builder = with_headers(self.agent.patch(path), headers);
                match body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };

        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(HttpResponse { status, headers, body })
    }
}
