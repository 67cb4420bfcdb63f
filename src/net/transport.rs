//! Wire transports.
//!
//! Native (`native`): `reqwest` with the configured timeout.
//! Browser (`hydrate`): `gloo-net` fetch raced against a `gloo-timers` timeout.
//!
//! ERROR HANDLING
//! ==============
//! A transport returns `Ok` for any response that arrived, whatever its
//! status. Only failures with no response (or no request) become `ApiError`.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use serde_json::Value;

use crate::error::ApiError;
#[cfg(any(feature = "native", feature = "hydrate"))]
use crate::{config::ClientConfig, error::TransportCode};

pub const AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// An outgoing request, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl HttpRequest {
    fn new(method: Method, path: &str, body: Option<Value>) -> Self {
        Self {
            method,
            path: path.to_owned(),
            headers: vec![(CONTENT_TYPE.to_owned(), JSON_CONTENT_TYPE.to_owned())],
            body,
        }
    }

    pub fn get(path: &str) -> Self {
        Self::new(Method::Get, path, None)
    }

    pub fn post(path: &str, body: Value) -> Self {
        Self::new(Method::Post, path, Some(body))
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Set `name`, replacing any existing value regardless of case.
    pub fn set_header(&mut self, name: &str, value: String) {
        self.headers.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
        self.headers.push((name.to_owned(), value));
    }
}

/// A response that arrived, successful or not.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Value,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Puts a request on the wire. Single-threaded, so futures need not be `Send`.
#[async_trait::async_trait(?Send)]
pub trait Transport {
    /// Send `request` and wait for its response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when no response arrived and
    /// [`ApiError::Request`] when the request could not be sent at all.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

#[async_trait::async_trait(?Send)]
impl<T: Transport + ?Sized> Transport for std::rc::Rc<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).send(request).await
    }
}

/// Parse a response body as JSON, keeping non-JSON text as a string.
pub fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_owned()))
}

// =============================================================================
// NATIVE
// =============================================================================

#[cfg(feature = "native")]
pub struct ReqwestTransport {
    http: reqwest::Client,
    config: ClientConfig,
}

#[cfg(feature = "native")]
impl ReqwestTransport {
    /// Build a transport for `config.base_url` with `config.timeout` as ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Request`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Request { message: e.to_string() })?;
        Ok(Self { http, config: config.clone() })
    }
}

#[cfg(feature = "native")]
#[async_trait::async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let url = self.config.url_for(&request.path);
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };
        let mut builder = self.http.request(method, url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(classify_reqwest_error)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(classify_reqwest_error)?;
        Ok(HttpResponse { status, body: parse_body(&text) })
    }
}

#[cfg(feature = "native")]
fn classify_reqwest_error(e: reqwest::Error) -> ApiError {
    let message = e.to_string();
    if e.is_timeout() {
        ApiError::Transport { code: Some(TransportCode::TimedOut), message }
    } else if e.is_connect() {
        ApiError::Transport { code: Some(TransportCode::Connect), message }
    } else if e.is_builder() {
        ApiError::Request { message }
    } else {
        ApiError::Transport { code: None, message }
    }
}

// =============================================================================
// BROWSER
// =============================================================================

#[cfg(feature = "hydrate")]
pub struct GlooTransport {
    config: ClientConfig,
}

#[cfg(feature = "hydrate")]
impl GlooTransport {
    pub fn new(config: &ClientConfig) -> Self {
        Self { config: config.clone() }
    }
}

#[cfg(feature = "hydrate")]
#[async_trait::async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        use futures::future::{self, Either};

        let url = self.config.url_for(&request.path);
        let timeout_ms = self.config.timeout_millis();
        let builder = match request.method {
            Method::Get => gloo_net::http::Request::get(&url),
            Method::Post => gloo_net::http::Request::post(&url),
        };
        let builder = request
            .headers
            .iter()
            .fold(builder, |builder, (name, value)| builder.header(name, value));
        let outgoing = match &request.body {
            Some(body) => builder.json(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Request { message: e.to_string() })?;

        let exchange = Box::pin(async move {
            let response = outgoing.send().await?;
            let status = response.status();
            let text = response.text().await?;
            Ok::<_, gloo_net::Error>((status, text))
        });
        let timer = Box::pin(gloo_timers::future::TimeoutFuture::new(timeout_ms));

        match future::select(exchange, timer).await {
            Either::Left((Ok((status, text)), _)) => Ok(HttpResponse { status, body: parse_body(&text) }),
            Either::Left((Err(e), _)) => Err(ApiError::Transport { code: None, message: e.to_string() }),
            Either::Right(((), _)) => Err(ApiError::Transport {
                code: Some(TransportCode::Aborted),
                message: format!("timeout of {timeout_ms}ms exceeded"),
            }),
        }
    }
}
