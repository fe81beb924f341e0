//! Engine reached over HTTP.

use axum::body::Body;
use axum::http::uri::Scheme;
use axum::http::{header, Method, Request, Uri};
use futures_util::future::BoxFuture;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::engine::{bounded, Engine, EngineError, EngineResult};
use crate::normalize::CanonicalRequest;

/// Forwards canonical requests to an engine service with `POST`.
#[derive(Clone)]
pub struct UpstreamEngine {
    uri: Uri,
    client: Client<HttpConnector, Body>,
    timeout_secs: Option<u64>,
}

impl UpstreamEngine {
    /// Create an engine client for an absolute `http://` URL.
    pub fn new(url: &str, timeout_secs: Option<u64>) -> EngineResult<Self> {
        let uri = parse_url(url)?;
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        Ok(Self {
            uri,
            client,
            timeout_secs,
        })
    }

    async fn call(&self, request: CanonicalRequest) -> EngineResult<String> {
        let payload = serde_json::to_vec(&request)?;
        let req = Request::builder()
            .method(Method::POST)
            .uri(self.uri.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload))
            .map_err(|e| EngineError::Transport(e.to_string()))?;

        let response = self
            .client
            .request(req)
            .await
            .map_err(|e| EngineError::Transport(e.to_string()))?;

        let status = response.status();
        let bytes = axum::body::to_bytes(Body::new(response.into_body()), usize::MAX)
            .await
            .map_err(|e| EngineError::Transport(e.to_string()))?;
        let text = String::from_utf8(bytes.to_vec()).map_err(|_| EngineError::InvalidOutput)?;

        if !status.is_success() {
            return Err(EngineError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(text)
    }
}

/// Parse an engine URL; only absolute `http://` URLs are supported.
pub fn parse_url(url: &str) -> EngineResult<Uri> {
    let uri: Uri = url
        .parse()
        .map_err(|e| EngineError::Config(format!("invalid upstream url {url:?}: {e}")))?;
    if uri.scheme() != Some(&Scheme::HTTP) || uri.authority().is_none() {
        return Err(EngineError::Config(format!(
            "upstream url {url:?} must be an absolute http:// url"
        )));
    }
    Ok(uri)
}

impl Engine for UpstreamEngine {
    fn name(&self) -> &'static str {
        "upstream"
    }

    fn run(&self, request: CanonicalRequest) -> BoxFuture<'_, EngineResult<String>> {
        Box::pin(bounded(self.timeout_secs, self.call(request)))
    }
}
