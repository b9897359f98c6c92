use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tokio::sync::watch;
use url::Url;

use crate::client::{ApiClient, ApiError, ApiResponse, ResponseFuture, ResponseMeta};
use crate::config::{ApiConfig, CredentialStatus, SecureString};
use crate::query::QueryRequest;

/// reqwest-backed [`ApiClient`].
pub struct HttpClient {
    client: Client,
    base_url: Url,
    token: Option<SecureString>,
    timeout: Duration,
    /// Bumped by `clear()`; requests started before the bump resolve
    /// with [`ApiError::Cancelled`].
    generation: watch::Sender<u64>,
}

impl HttpClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(u64::from(config.connect_timeout_seconds)))
            .build()
            .map_err(ApiError::Build)?;

        let token = match config.resolve_credential() {
            CredentialStatus::Configured(token) => Some(token),
            CredentialStatus::Anonymous => None,
        };

        let base_url = Url::parse(config.base_url.trim_end_matches('/'))?;
        let (generation, _) = watch::channel(0);

        Ok(Self {
            client,
            base_url,
            token,
            timeout: Duration::from_secs(u64::from(config.timeout_seconds)),
            generation,
        })
    }

    /// `{base_url}{request.path}?{params}`. A path prefix on the base URL is kept.
    fn url_for(&self, request: &QueryRequest) -> Url {
        let mut url = self.base_url.clone();
        let path = format!("{}{}", self.base_url.path().trim_end_matches('/'), request.path);
        url.set_path(&path);
        if !request.params.is_empty() {
            url.query_pairs_mut().extend_pairs(request.params.to_pairs());
        }
        url
    }
}

impl ApiClient for HttpClient {
    fn request(&self, request: &QueryRequest) -> ResponseFuture {
        let url = self.url_for(request);
        let mut builder = self.client.get(url.as_str());
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token.expose());
        }

        let mut cancelled = self.generation.subscribe();
        let timeout = self.timeout;

        tracing::debug!(url = %url, "Sending request");

        Box::pin(async move {
            tokio::select! {
                result = tokio::time::timeout(timeout, execute(builder, url.into())) => match result {
                    Ok(response) => response,
                    Err(_) => Err(ApiError::Timeout {
                        duration: timeout.as_secs(),
                    }),
                },
                Ok(()) = cancelled.changed() => Err(ApiError::Cancelled),
            }
        })
    }

    fn clear(&self) {
        self.generation.send_modify(|generation| *generation += 1);
        tracing::debug!("Cleared in-flight requests");
    }
}

async fn execute(builder: RequestBuilder, url: String) -> Result<ApiResponse, ApiError> {
    let response = builder
        .send()
        .await
        .map_err(|e| ApiError::Connection {
            url: url.clone(),
            source: e,
        })?;

    let status = response.status();
    let headers = readable_headers(response.headers());
    let status_text = status.canonical_reason().map(str::to_string);

    let bytes = response
        .bytes()
        .await
        .map_err(|e| ApiError::Connection { url, source: e })?;

    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            body: serde_json::from_slice(&bytes).ok(),
        });
    }

    let payload = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))?
    };

    Ok(ApiResponse {
        payload,
        status_text,
        meta: ResponseMeta::new(status.as_u16(), headers),
    })
}

/// Headers whose values are visible ASCII. Others are dropped rather than
/// reported as empty, so a garbled `Link` never replaces known page info.
fn readable_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
        .collect()
}
