use futures::{FutureExt as _, future::BoxFuture};
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret as _, SecretString};

use crate::{Error, GeneratorConfig, Result};

/// Raw outcome of one HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// Whether the status code was 2xx
    pub is_success: bool,
    pub body: String,
}

/// Sends a serialized request and hands back the unparsed response
///
/// Implementations own timeouts and connection handling; the generator calls `send` exactly once
/// per request and never retries.
pub trait Transport: Send + Sync {
    fn send<'a>(&'a self, endpoint: &'a str, body: String) -> BoxFuture<'a, Result<RawResponse>>;
}

/// [Transport] over a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    reqwest: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        Self::with_headers(config, HeaderMap::new())
    }

    /// Authenticates every request with a bearer token and a project header instead of an API key
    pub fn with_cloud_project(
        config: &GeneratorConfig,
        project_header: &str,
        project_id: &str,
        bearer: &SecretString,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();

        let name = HeaderName::from_bytes(project_header.as_bytes())
            .map_err(|e| Error::validation(format!("invalid project header name: {e}")))?;
        let value = HeaderValue::from_str(project_id)
            .map_err(|e| Error::validation(format!("invalid project id: {e}")))?;
        headers.insert(name, value);

        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/json"),
        );

        let mut authorization =
            HeaderValue::from_str(&format!("Bearer {}", bearer.expose_secret()))
                .map_err(|e| Error::validation(format!("invalid bearer token: {e}")))?;
        authorization.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, authorization);

        Self::with_headers(config, headers)
    }

    fn with_headers(config: &GeneratorConfig, headers: HeaderMap) -> Result<Self> {
        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            reqwest: builder.build()?,
        })
    }
}

impl Transport for HttpTransport {
    fn send<'a>(&'a self, endpoint: &'a str, body: String) -> BoxFuture<'a, Result<RawResponse>> {
        async move {
            let response = self
                .reqwest
                .post(endpoint)
                .header(header::CONTENT_TYPE, "application/json")
                .body(body)
                .send()
                .await?;

            let is_success = response.status().is_success();
            let body = response.text().await?;
            Ok(RawResponse { is_success, body })
        }
        .boxed()
    }
}
