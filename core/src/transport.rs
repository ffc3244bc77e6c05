//! The seam between request building and the network.
//!
//! `Transport` executes one `HttpRequest` and hands back the raw response.
//! Non-2xx statuses are returned as data; only failures that prevent a
//! response from arriving are errors. There are no retries at this layer.

use crate::error::CmaResult;
use crate::http::{HttpRequest, HttpResponse};

pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> CmaResult<HttpResponse>;
}

/// Closures act as transports, which keeps test doubles short.
impl<F> Transport for F
where
    F: Fn(&HttpRequest) -> CmaResult<HttpResponse> + Send + Sync,
{
    fn execute(&self, request: &HttpRequest) -> CmaResult<HttpResponse> {
        self(request)
    }
}

#[cfg(feature = "ureq-transport")]
pub use blocking::UreqTransport;

#[cfg(feature = "ureq-transport")]
mod blocking {
    use tracing::warn;

    use crate::error::{CmaError, CmaResult};
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    use super::Transport;

    /// Blocking transport backed by a shared `ureq` agent.
    #[derive(Clone)]
    pub struct UreqTransport {
        agent: ureq::Agent,
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl UreqTransport {
        /// 4xx/5xx responses are returned as data rather than `Err`, letting
        /// the client handle status interpretation.
        pub fn new() -> Self {
            let agent = ureq::Agent::config_builder()
                .http_status_as_error(false)
                .build()
                .new_agent();
            Self { agent }
        }
    }

    fn decorate<B>(mut builder: ureq::RequestBuilder<B>, request: &HttpRequest) -> ureq::RequestBuilder<B> {
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder.query_pairs(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    impl Transport for UreqTransport {
        fn execute(&self, request: &HttpRequest) -> CmaResult<HttpResponse> {
            let url = request.url.as_str();
            let body = request.body.as_deref();
            let result = match request.method {
                HttpMethod::Get => decorate(self.agent.get(url), request).call(),
                HttpMethod::Delete => decorate(self.agent.delete(url), request).call(),
                HttpMethod::Post => {
                    let builder = decorate(self.agent.post(url), request);
                    match body {
                        Some(body) => builder.send(body.as_bytes()),
                        None => builder.send_empty(),
                    }
                }
                HttpMethod::Put => {
                    let builder = decorate(self.agent.put(url), request);
                    match body {
                        Some(body) => builder.send(body.as_bytes()),
                        None => builder.send_empty(),
                    }
                }
            };

            let mut response = result.map_err(|e| {
                warn!(method = %request.method, url, error = %e, "transport failure");
                CmaError::transport(request, e.to_string())
            })?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|value| (name.as_str().to_string(), value.to_string()))
                })
                .collect();
            let body = response
                .body_mut()
                .read_to_string()
                .map_err(|e| CmaError::transport(request, e.to_string()))?;

            Ok(HttpResponse { status, headers, body })
        }
    }
}
