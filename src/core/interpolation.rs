use crate::core::{
    ExchangeRequest, ExchangeResponse, HttpProvider, InterpolationOperations, RestExecutor,
    ServicesData,
};
use crate::utils::error::{CredHubError, Result};
use async_trait::async_trait;
use reqwest::StatusCode;

pub const INTERPOLATE_URL_PATH: &str = "/api/v1/interpolate";

/// 透過 CredHub 的 interpolate 端點解析服務綁定中的憑證參照
pub struct InterpolationClient<P: HttpProvider> {
    provider: P,
}

impl<P: HttpProvider> InterpolationClient<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

#[async_trait]
impl<P: HttpProvider> InterpolationOperations for InterpolationClient<P> {
    async fn interpolate_service_data(&self, service_data: &ServicesData) -> Result<ServicesData> {
        let body = serde_json::to_vec(service_data).map_err(CredHubError::SerializationError)?;

        tracing::debug!(
            "Interpolating {} service bindings across {} labels",
            service_data.binding_count(),
            service_data.len()
        );

        self.provider
            .with_executor(move |executor| async move {
                let request = ExchangeRequest::post_json(INTERPOLATE_URL_PATH, body);
                let response = executor.exchange(request).await?;

                tracing::debug!("Interpolate response status: {}", response.status);

                throw_exception_on_error(response)?.json::<ServicesData>()
            })
            .await
    }
}

/// 只有 `200 OK` 算成功，其他 2xx 也視為錯誤
fn throw_exception_on_error(response: ExchangeResponse) -> Result<ExchangeResponse> {
    if response.status != StatusCode::OK {
        let body = if response.body.is_empty() {
            None
        } else {
            Some(response.body_text())
        };
        return Err(CredHubError::RemoteError {
            status: response.status,
            body,
        });
    }
    Ok(response)
}
