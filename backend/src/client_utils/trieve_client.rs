//! HTTP client for the upstream dataset API.

use anyhow::Context;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE};
use reqwest::{Method, RequestBuilder, Url};
use serde::{Deserialize, de::DeserializeOwned};

const DEFAULT_API_HOST: &str = "http://localhost:8090/api";

/// Where the upstream API lives and how to authenticate against it.
#[derive(Debug, Clone, PartialEq)]
pub struct TrieveApiConfig {
    pub api_host: String,
    /// Raw `Cookie` header value of a logged in session.
    pub session_cookie: Option<String>,
    /// Sent as the `Authorization` header.
    pub api_key: Option<String>,
}

impl TrieveApiConfig {
    pub fn new(api_host: impl Into<String>) -> Self {
        Self { api_host: api_host.into(), session_cookie: None, api_key: None }
    }

    /// Reads `TRIEVE_API_HOST`, `TRIEVE_SESSION_COOKIE` and `TRIEVE_API_KEY`.
    pub fn from_env() -> Self {
        Self {
            api_host: std::env::var("TRIEVE_API_HOST").unwrap_or(DEFAULT_API_HOST.to_string()),
            session_cookie: std::env::var("TRIEVE_SESSION_COOKIE").ok(),
            api_key: std::env::var("TRIEVE_API_KEY").ok(),
        }
    }

    pub fn with_session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(cookie.into());
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

#[derive(Debug, Deserialize)]
struct ErrorResponseBody {
    message: String,
}

#[derive(Debug, Clone)]
pub struct TrieveApiClient {
    config: TrieveApiConfig,
    http: reqwest::Client,
}

impl TrieveApiClient {
    pub fn new(config: TrieveApiConfig) -> Self {
        Self { config, http: reqwest::Client::new() }
    }

    pub fn from_env() -> Self {
        Self::new(TrieveApiConfig::from_env())
    }

    pub fn config(&self) -> &TrieveApiConfig {
        &self.config
    }

    /// Request to `{api_host}/{segments...}` carrying the configured credentials.
    ///
    /// Each segment is percent-encoded on its own, so ids containing `/` or
    /// `?` stay inside their segment.
    pub(crate) fn request(&self, method: Method, segments: &[&str]) -> anyhow::Result<RequestBuilder> {
        let mut url = Url::parse(&self.config.api_host)
            .with_context(|| format!("Invalid api host: {}", self.config.api_host))?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Api host cannot take a path: {}", self.config.api_host))?
            .pop_if_empty()
            .extend(segments);
        let mut request = self.http.request(method, url).header(CONTENT_TYPE, "application/json");
        if let Some(cookie) = &self.config.session_cookie {
            request = request.header(COOKIE, cookie);
        }
        if let Some(api_key) = &self.config.api_key {
            request = request.header(AUTHORIZATION, api_key);
        }
        Ok(request)
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> anyhow::Result<T> {
        let response_txt = Self::send(request).await?;
        let response: T = serde_json::from_str(&response_txt)
            .with_context(|| format!("Failed to decode upstream response: {}", response_txt))?;
        Ok(response)
    }

    pub(crate) async fn send_empty(request: RequestBuilder) -> anyhow::Result<()> {
        Self::send(request).await?;
        Ok(())
    }

    async fn send(request: RequestBuilder) -> anyhow::Result<String> {
        let response = request.send().await?;
        let status = response.status();
        let response_txt = response.text().await?;
        if !status.is_success() {
            // upstream errors are `{"message": ...}`; fall back to the raw body
            let message = serde_json::from_str::<ErrorResponseBody>(&response_txt)
                .map(|body| body.message)
                .unwrap_or(response_txt);
            anyhow::bail!("Error: {}: {}", status, message);
        }
        Ok(response_txt)
    }
}
