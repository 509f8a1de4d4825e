//! Chat-completions oracle client (OpenAI and Azure OpenAI)

use super::models::{ChatMessage, ChatRequest, ChatResponse, ResponseFormat};
use super::{Oracle, OracleRequest};
use crate::config::{OracleConfig, OracleProvider};
use crate::domain::OracleError;
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use secrecy::ExposeSecret;
use std::time::Duration;

/// Oracle backed by a chat-completions endpoint with structured JSON output
///
/// # Example
///
/// ```no_run
/// use cvscrub::adapters::llm::ChatCompletionsOracle;
/// use cvscrub::config::OracleConfig;
///
/// # fn example() -> Result<(), cvscrub::domain::OracleError> {
/// let oracle = ChatCompletionsOracle::new(OracleConfig::default())?;
/// # Ok(())
/// # }
/// ```
pub struct ChatCompletionsOracle {
    client: Client,
    endpoint: String,
    config: OracleConfig,
}

impl ChatCompletionsOracle {
    /// Build a client from configuration
    ///
    /// # Errors
    ///
    /// Returns `OracleError::Config` when the HTTP client cannot be built or
    /// the provider settings are incomplete.
    pub fn new(config: OracleConfig) -> Result<Self, OracleError> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| OracleError::Config(format!("Failed to build HTTP client: {e}")))?;

        let endpoint = Self::endpoint_for(&config)?;

        Ok(Self {
            client,
            endpoint,
            config,
        })
    }

    fn endpoint_for(config: &OracleConfig) -> Result<String, OracleError> {
        let base = config.base_url.trim_end_matches('/');
        match config.provider {
            OracleProvider::OpenAi => Ok(format!("{base}/chat/completions")),
            OracleProvider::Azure => {
                let version = config.api_version.as_deref().ok_or_else(|| {
                    OracleError::Config("api_version is required for Azure".to_string())
                })?;
                Ok(format!(
                    "{base}/openai/deployments/{}/chat/completions?api-version={version}",
                    config.model
                ))
            }
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_body(&self, request: &OracleRequest) -> ChatRequest {
        let model = match self.config.provider {
            OracleProvider::OpenAi => Some(self.config.model.clone()),
            OracleProvider::Azure => None,
        };

        ChatRequest {
            model,
            messages: vec![
                ChatMessage::system(request.system_prompt.clone()),
                ChatMessage::user(request.user_prompt.clone()),
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            response_format: ResponseFormat::json_schema(
                request.schema_name.clone(),
                request.schema.clone(),
            ),
        }
    }

    async fn send_once(&self, body: &ChatRequest) -> Result<String, OracleError> {
        let mut http_request = self.client.post(&self.endpoint).json(body);

        if let Some(ref key) = self.config.api_key {
            let key = key.expose_secret().as_str();
            http_request = match self.config.provider {
                OracleProvider::OpenAi => http_request.bearer_auth(key),
                OracleProvider::Azure => http_request.header("api-key", key),
            };
        }

        let response = http_request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(OracleError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .first_content()
            .map(str::to_string)
            .ok_or(OracleError::EmptyResponse)
    }

    /// Retry a request with exponential backoff
    async fn retry_request<F, T, Fut>(&self, operation: F) -> Result<T, OracleError>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T, OracleError>>,
    {
        let max_retries = self.config.retry.max_retries.max(1);
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    attempt += 1;
                    if attempt >= max_retries || !e.is_retryable() {
                        return Err(e);
                    }

                    let delay_ms = self.config.retry.delay_for_attempt(attempt);
                    crate::log_retry_attempt!(attempt, max_retries, e);
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
            }
        }
    }
}

#[async_trait]
impl Oracle for ChatCompletionsOracle {
    async fn complete(&self, request: &OracleRequest) -> Result<String, OracleError> {
        let body = self.build_body(request);
        tracing::debug!(
            endpoint = %self.endpoint,
            model = %self.config.model,
            "Sending oracle request"
        );
        self.retry_request(|| self.send_once(&body)).await
    }

    fn name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    #[test]
    fn test_openai_endpoint() {
        let config = OracleConfig {
            base_url: "https://api.openai.com/v1/".to_string(),
            ..Default::default()
        };
        let oracle = ChatCompletionsOracle::new(config).unwrap();
        assert_eq!(oracle.endpoint(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn test_azure_endpoint() {
        let config = OracleConfig {
            provider: OracleProvider::Azure,
            base_url: "https://res.openai.azure.com".to_string(),
            model: "pii-extractor".to_string(),
            api_version: Some("2024-08-01-preview".to_string()),
            api_key: Some(secret_string("key".to_string())),
            ..Default::default()
        };
        let oracle = ChatCompletionsOracle::new(config).unwrap();
        assert_eq!(
            oracle.endpoint(),
            "https://res.openai.azure.com/openai/deployments/pii-extractor/chat/completions?api-version=2024-08-01-preview"
        );
    }

    #[test]
    fn test_azure_without_version_is_config_error() {
        let config = OracleConfig {
            provider: OracleProvider::Azure,
            ..Default::default()
        };
        assert!(matches!(
            ChatCompletionsOracle::new(config),
            Err(OracleError::Config(_))
        ));
    }
}
