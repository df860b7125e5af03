use std::time::Duration;

use desk_logging::{desk_debug, desk_error, desk_info, desk_warn};
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use crate::response::parse_generation_body;
use crate::{GeneratedDocument, GenerationError};

/// Client settings. No timeout is applied unless one is configured, so a
/// hung generator keeps the submission outstanding.
#[derive(Debug, Clone, Default)]
pub struct GeneratorSettings {
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
}

#[async_trait::async_trait]
pub trait Generator: Send + Sync {
    /// Sends `body` to `endpoint` once and returns the validated document.
    async fn generate(
        &self,
        endpoint: &str,
        body: &Value,
    ) -> Result<GeneratedDocument, GenerationError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestGenerator {
    client: reqwest::Client,
}

impl ReqwestGenerator {
    pub fn new(settings: GeneratorSettings) -> Result<Self, GenerationError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| GenerationError::Transport(err.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Generator for ReqwestGenerator {
    async fn generate(
        &self,
        endpoint: &str,
        body: &Value,
    ) -> Result<GeneratedDocument, GenerationError> {
        let url = reqwest::Url::parse(endpoint)
            .map_err(|err| GenerationError::InvalidEndpoint(err.to_string()))?;
        let payload = serde_json::to_vec(body)
            .map_err(|err| GenerationError::InvalidPayload(err.to_string()))?;

        desk_info!("POST {} ({} bytes)", url, payload.len());
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            desk_warn!("Generator answered {}", status);
            return Err(GenerationError::RequestFailed {
                status: status.as_u16(),
            });
        }

        let raw = response.text().await.map_err(map_reqwest_error)?;
        desk_debug!("Generator answered {} with {} bytes", status, raw.len());

        parse_generation_body(&raw).inspect_err(|err| {
            if let GenerationError::MalformedResponse { raw } = err {
                desk_error!("Raw server response: {}", desk_logging::excerpt(raw));
            }
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> GenerationError {
    if err.is_timeout() {
        return GenerationError::Transport("request timed out".to_string());
    }
    GenerationError::Transport(err.to_string())
}
