//! Request issuing seam between the typed client and HTTP.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::RequestFailure;

/// Issues requests against paths relative to the application root and
/// yields the raw response body of a 2xx reply.
#[async_trait]
pub trait RequestIssuer: Send + Sync {
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<String, RequestFailure>;
    async fn post(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: Option<Value>,
    ) -> Result<String, RequestFailure>;
}

#[derive(Clone)]
pub struct HttpRequestIssuer {
    http: Client,
    base_url: Url,
}

impl HttpRequestIssuer {
    pub fn new(base_url: &str) -> Result<Self, RequestFailure> {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, RequestFailure> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RequestFailure::Transport(e.to_string()))?;
        Self::with_client(base_url, http)
    }

    fn with_client(base_url: &str, http: Client) -> Result<Self, RequestFailure> {
        Ok(Self {
            http,
            base_url: Url::parse(&normalize_base_url(base_url))?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves `path` beneath the base url, like `App.uri(path)` on the web client.
    pub fn uri(&self, path: &str) -> Result<Url, RequestFailure> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    async fn finish(
        method: &'static str,
        url: &Url,
        request: reqwest::RequestBuilder,
    ) -> Result<String, RequestFailure> {
        debug!(method, url = %url, "issuing request");
        let response = request.send().await.map_err(|e| {
            warn!(method, url = %url, "request transport failure: {e}");
            RequestFailure::Transport(e.to_string())
        })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RequestFailure::Transport(e.to_string()))?;
        if status.is_success() {
            Ok(body)
        } else {
            warn!(method, url = %url, status = status.as_u16(), "request rejected");
            Err(RequestFailure::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[async_trait]
impl RequestIssuer for HttpRequestIssuer {
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<String, RequestFailure> {
        let url = self.uri(path)?;
        let request = self.http.get(url.clone()).query(query);
        Self::finish("GET", &url, request).await
    }

    async fn post(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: Option<Value>,
    ) -> Result<String, RequestFailure> {
        let url = self.uri(path)?;
        let mut request = self.http.post(url.clone()).query(query);
        if let Some(body) = body {
            request = request.json(&body);
        }
        Self::finish("POST", &url, request).await
    }
}

/// Ensures the base ends with `/` so relative paths join beneath it.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    }
}
