//! Client for the mutual-TLS fetch proxy
//!
//! The proxy performs a client-certificate-authenticated GET against a feed
//! endpoint and returns the response body as text. This module only speaks the
//! proxy's JSON contract; TLS and certificate handling live in the proxy.

use crate::config::ProxyConfig;
use crate::errors::{FetchError, FetchResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Body posted to the proxy
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchRequest {
    pub endpoint: String,
    pub p12_base64: String,
    pub passphrase: String,
}

/// Body returned by the proxy for both upstream success and failure
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResponse {
    pub ok: bool,
    pub upstream_status: u16,
    #[serde(default)]
    pub upstream_status_text: String,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
struct ProxyErrorBody {
    error: Option<String>,
}

/// HTTP client bound to one proxy URL
pub struct ProxyClient {
    http: reqwest::Client,
    proxy_url: String,
}

impl ProxyClient {
    pub fn new(config: &ProxyConfig) -> FetchResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            proxy_url: config.url.clone(),
        })
    }

    pub fn proxy_url(&self) -> &str {
        &self.proxy_url
    }

    /// Fetch the endpoint through the proxy and return the upstream body text
    pub async fn fetch(&self, request: &FetchRequest) -> FetchResult<String> {
        validate_endpoint(&request.endpoint)?;

        info!("Fetching {} via {}", request.endpoint, self.proxy_url);
        let response = self.http.post(&self.proxy_url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ProxyErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("proxy request failed")
                        .to_string()
                });
            warn!("Proxy returned {}: {}", status.as_u16(), message);
            return Err(FetchError::Proxy {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: FetchResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Proxy {
                status: status.as_u16(),
                message: format!("unreadable proxy response: {}", e),
            })?;

        if !parsed.ok {
            return Err(FetchError::Upstream {
                status: parsed.upstream_status,
                status_text: parsed.upstream_status_text,
            });
        }

        debug!(
            "Upstream {} {} ({}), {} chars",
            parsed.upstream_status,
            parsed.upstream_status_text,
            parsed.content_type.as_deref().unwrap_or("no content type"),
            parsed.text.len()
        );
        Ok(parsed.text)
    }
}

/// Require an absolute https URL
pub fn validate_endpoint(endpoint: &str) -> FetchResult<Url> {
    let url = Url::parse(endpoint)
        .map_err(|e| FetchError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;
    if url.scheme() != "https" {
        return Err(FetchError::InvalidEndpoint(format!(
            "{}: only https endpoints are supported",
            endpoint
        )));
    }
    Ok(url)
}

/// Read a PKCS#12 client certificate and encode it for the proxy
pub fn load_p12_base64(path: &Path) -> FetchResult<String> {
    let bytes = std::fs::read(path)
        .map_err(|e| FetchError::Certificate(format!("{}: {}", path.display(), e)))?;
    if bytes.is_empty() {
        return Err(FetchError::Certificate(format!(
            "{}: file is empty",
            path.display()
        )));
    }
    Ok(STANDARD.encode(bytes))
}
