use crate::config::ClientConfig;
use crate::core::{ExchangeRequest, ExchangeResponse, HttpProvider, RestExecutor};
use crate::utils::error::{CredHubError, Result};
use crate::utils::validation::Validate;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use url::Url;

/// 以 reqwest 實作的執行器，相對路徑接在 base URL 之後
#[derive(Debug, Clone)]
pub struct ReqwestExecutor {
    client: Client,
    base_url: Url,
}

impl ReqwestExecutor {
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends `path` to the base URL, keeping any path prefix the base carries.
    pub fn resolve(&self, path: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);

        url.path_segments_mut()
            .map_err(|_| CredHubError::InvalidConfigValueError {
                field: "credhub.url".to_string(),
                value: self.base_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            })?
            .pop_if_empty()
            .extend(path.split('/').filter(|segment| !segment.is_empty()));

        Ok(url)
    }
}

impl RestExecutor for ReqwestExecutor {
    fn exchange(
        &self,
        request: ExchangeRequest,
    ) -> impl Future<Output = Result<ExchangeResponse>> + Send {
        async move {
            let url = self.resolve(&request.path)?;

            tracing::debug!("{} {}", request.method, url);

            let mut builder = self
                .client
                .request(request.method, url)
                .headers(request.headers);
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await?;
            let status = response.status();
            let headers = response.headers().clone();
            let body = response.bytes().await?.to_vec();

            tracing::debug!("Received {} ({} bytes)", status, body.len());

            Ok(ExchangeResponse {
                status,
                headers,
                body,
            })
        }
    }
}

/// Builds and owns the configured transport; lends the executor to each call.
#[derive(Debug, Clone)]
pub struct ReqwestProvider {
    executor: ReqwestExecutor,
}

impl ReqwestProvider {
    pub fn new(client: Client, base_url: Url) -> Self {
        Self {
            executor: ReqwestExecutor::new(client, base_url),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let base_url = Url::parse(config.url()).map_err(|e| {
            CredHubError::InvalidConfigValueError {
                field: "credhub.url".to_string(),
                value: config.url().to_string(),
                reason: format!("Invalid URL format: {}", e),
            }
        })?;

        let mut builder = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .default_headers(default_headers(config)?);
        if let Some(user_agent) = config.user_agent() {
            builder = builder.user_agent(user_agent.to_string());
        }

        let client = builder.build().map_err(|e| CredHubError::ConfigError {
            message: format!("Failed to build HTTP client: {}", e),
        })?;

        Ok(Self::new(client, base_url))
    }

    pub fn base_url(&self) -> &Url {
        self.executor.base_url()
    }
}

impl HttpProvider for ReqwestProvider {
    type Executor = ReqwestExecutor;

    fn with_executor<'a, T, F, Fut>(
        &'a self,
        callback: F,
    ) -> impl Future<Output = Result<T>> + Send + 'a
    where
        T: Send + 'a,
        F: FnOnce(&'a Self::Executor) -> Fut + Send + 'a,
        Fut: Future<Output = Result<T>> + Send + 'a,
    {
        callback(&self.executor)
    }
}

fn default_headers(config: &ClientConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    for (name, value) in config.headers() {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            CredHubError::InvalidConfigValueError {
                field: "credhub.headers".to_string(),
                value: name.clone(),
                reason: format!("Invalid header name: {}", e),
            }
        })?;
        let mut header_value =
            HeaderValue::from_str(value).map_err(|e| CredHubError::InvalidConfigValueError {
                field: format!("credhub.headers.{}", name),
                value: "<redacted>".to_string(),
                reason: format!("Invalid header value: {}", e),
            })?;
        header_value.set_sensitive(true);
        headers.insert(header_name, header_value);
    }

    Ok(headers)
}
