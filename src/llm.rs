//! LLM provider abstraction
//!
//! One remote chat completion call per exchange. The remote side keeps no
//! memory; callers send the full transcript every time.

mod error;
mod openai;
mod types;

#[cfg(test)]
pub mod testing;

pub use error::{LlmError, LlmErrorKind};
pub use openai::OpenAIService;
pub use types::*;

use crate::config::LlmConfig;
use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for chat completion providers
#[async_trait]
pub trait LlmService: Send + Sync {
    /// Make a completion request
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError>;

    /// Get the model ID
    fn model_id(&self) -> &str;
}

/// Build the production service from a loaded config.
///
/// Returns `None` when there is no usable configuration; conversations
/// created without a service are unconfigured and refuse every exchange.
pub fn service_from_config(config: Option<&LlmConfig>) -> Option<Arc<dyn LlmService>> {
    let config = config?;
    match OpenAIService::new(config) {
        Ok(service) => {
            tracing::info!(model = %config.model, base_url = %config.base_url, "LLM client ready");
            Some(Arc::new(LoggingService::new(Arc::new(service))))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create LLM client");
            None
        }
    }
}

/// Logging wrapper for LLM services
pub struct LoggingService {
    inner: Arc<dyn LlmService>,
    model_id: String,
}

impl LoggingService {
    pub fn new(inner: Arc<dyn LlmService>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl LlmService for LoggingService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let start = std::time::Instant::now();
        let result = self.inner.complete(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(response) => {
                tracing::info!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    turns = request.messages.len(),
                    input_tokens = response.usage.input_tokens,
                    output_tokens = response.usage.output_tokens,
                    "LLM request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    kind = ?e.kind,
                    retryable = e.kind.is_retryable(),
                    "LLM request failed"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

#[cfg(test)]
mod tests {
    use super::testing::MockLlmService;
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_no_config_no_service() {
        assert!(service_from_config(None).is_none());
    }

    #[test]
    fn test_config_builds_logged_service() {
        let config = LlmConfig {
            model: "gpt-4o-mini".to_string(),
            api_key: "sk-test".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(10),
        };
        let service = service_from_config(Some(&config)).unwrap();
        assert_eq!(service.model_id(), "gpt-4o-mini");
    }

    #[tokio::test]
    async fn test_logging_service_passes_through() {
        let mock = Arc::new(MockLlmService::new("mock"));
        mock.queue_text("ok");
        mock.queue_error(LlmError::rate_limit("slow down"));
        let logged = LoggingService::new(mock.clone());

        let request = LlmRequest {
            messages: vec![Turn::user("hi")],
        };
        assert_eq!(logged.complete(&request).await.unwrap().text, "ok");
        let err = logged.complete(&request).await.unwrap_err();
        assert_eq!(err.kind, LlmErrorKind::RateLimit);
        assert_eq!(mock.recorded_requests().len(), 2);
        assert_eq!(logged.model_id(), "mock");
    }
}
