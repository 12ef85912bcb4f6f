use async_trait::async_trait;
use crew_application::ports::llm_gateway::{GatewayError, LlmGateway};
use crew_domain::{Message, ModelSettings};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_delay_ms: 500,
            max_delay_ms: 30_000,
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

/// Retries transient gateway failures with exponential backoff
///
/// Authentication errors and malformed responses are returned immediately.
pub struct RetryingGateway<G: LlmGateway> {
    inner: G,
    config: RetryConfig,
}

impl<G: LlmGateway> RetryingGateway<G> {
    pub fn new(inner: G, config: RetryConfig) -> Self {
        Self { inner, config }
    }

    fn is_retryable(error: &GatewayError) -> bool {
        match error {
            GatewayError::RequestFailed(msg) => msg.starts_with("HTTP 5"),
            other => other.is_transient(),
        }
    }

    /// Server-requested delay in milliseconds
    fn retry_after_ms(error: &GatewayError) -> Option<u64> {
        match error {
            GatewayError::RateLimited {
                retry_after: Some(secs),
                ..
            } => Some(secs.saturating_mul(1000)),
            _ => None,
        }
    }

    fn compute_delay(&self, attempt: u32) -> u64 {
        let base = self.config.initial_delay_ms as f64
            * self.config.backoff_multiplier.powi(attempt as i32);
        (base as u64).min(self.config.max_delay_ms)
    }
}

#[async_trait]
impl<G: LlmGateway> LlmGateway for RetryingGateway<G> {
    async fn complete(
        &self,
        settings: &ModelSettings,
        messages: &[Message],
    ) -> Result<String, GatewayError> {
        let mut attempt = 0;
        loop {
            match self.inner.complete(settings, messages).await {
                Ok(reply) => return Ok(reply),
                Err(e) if attempt < self.config.max_retries && Self::is_retryable(&e) => {
                    let delay = Self::retry_after_ms(&e)
                        .unwrap_or_else(|| self.compute_delay(attempt))
                        .min(self.config.max_delay_ms);
                    warn!(
                        attempt = attempt + 1,
                        max_retries = self.config.max_retries,
                        delay_ms = delay,
                        error = %e,
                        "Retrying LLM request"
                    );
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
