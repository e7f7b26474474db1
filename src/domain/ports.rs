use crate::domain::model::ServicesData;
use crate::utils::error::{CredHubError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use std::future::Future;

/// 一次 HTTP 交換的請求內容，路徑為相對路徑，base URL 由 provider 決定
#[derive(Debug, Clone)]
pub struct ExchangeRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl ExchangeRequest {
    /// `POST` a JSON document, announcing JSON both ways.
    pub fn post_json(path: &str, body: Vec<u8>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Self {
            method: Method::POST,
            path: path.to_string(),
            headers,
            body: Some(body),
        }
    }
}

/// 回應內容一律保留原始位元組
#[derive(Debug, Clone)]
pub struct ExchangeResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl ExchangeResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(CredHubError::DeserializationError)
    }

    /// Body as text for diagnostics only; invalid UTF-8 is replaced.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// 已設定好傳輸層（base URL、驗證、TLS、逾時）的 HTTP 執行器
pub trait RestExecutor: Send + Sync {
    fn exchange(
        &self,
        request: ExchangeRequest,
    ) -> impl Future<Output = Result<ExchangeResponse>> + Send;
}

/// Lends a configured [`RestExecutor`] to a callback for the duration of one call.
///
/// Transport concerns (authentication headers, TLS, timeouts) live entirely on
/// the provider side; callers only see the executor while the callback runs.
pub trait HttpProvider: Send + Sync {
    type Executor: RestExecutor;

    fn with_executor<'a, T, F, Fut>(
        &'a self,
        callback: F,
    ) -> impl Future<Output = Result<T>> + Send + 'a
    where
        T: Send + 'a,
        F: FnOnce(&'a Self::Executor) -> Fut + Send + 'a,
        Fut: Future<Output = Result<T>> + Send + 'a;
}

#[async_trait]
pub trait InterpolationOperations: Send + Sync {
    /// Replace credential references in `service_data` with the values stored in CredHub.
    async fn interpolate_service_data(&self, service_data: &ServicesData) -> Result<ServicesData>;

    /// 同上，但輸入為未經檢查的 JSON 文件
    async fn interpolate_value(&self, service_data: serde_json::Value) -> Result<ServicesData> {
        let service_data = ServicesData::from_value(service_data)?;
        self.interpolate_service_data(&service_data).await
    }
}
