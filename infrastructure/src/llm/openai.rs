use async_trait::async_trait;
use crew_application::ports::llm_gateway::{GatewayError, LlmGateway};
use crew_domain::{Message, MessageRole, ModelSettings};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Gateway to an OpenAI-compatible chat completion API
pub struct OpenAiGateway {
    base_url: String,
    api_key: Option<String>,
    http: reqwest::Client,
}

impl OpenAiGateway {
    pub fn new(
        base_url: Option<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Other(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            api_key,
            http,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn build_request<'a>(settings: &'a ModelSettings, messages: &'a [Message]) -> ChatRequest<'a> {
        ChatRequest {
            model: settings.model(),
            messages: messages
                .iter()
                .map(|m| ChatMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                    name: match m.role {
                        MessageRole::System => None,
                        _ => m.name.as_deref().and_then(sanitize_name),
                    },
                })
                .collect(),
            temperature: settings.temperature(),
            max_tokens: settings.max_tokens(),
        }
    }
}

/// The API accepts `[A-Za-z0-9_-]{1,64}` as a message name
fn sanitize_name(name: &str) -> Option<String> {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .take(64)
        .collect();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

fn map_status(status: StatusCode, body: &str, retry_after: Option<&str>) -> GatewayError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            GatewayError::AuthenticationFailed(format!("HTTP {status}: {body}"))
        }
        StatusCode::TOO_MANY_REQUESTS => GatewayError::RateLimited {
            message: format!("HTTP {status}: {body}"),
            retry_after: retry_after.and_then(|v| v.trim().parse::<u64>().ok()),
        },
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => GatewayError::Timeout,
        _ => GatewayError::RequestFailed(format!("HTTP {status}: {body}")),
    }
}

fn map_transport(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout
    } else if error.is_connect() {
        GatewayError::ConnectionError(error.to_string())
    } else {
        GatewayError::RequestFailed(error.to_string())
    }
}

#[async_trait]
impl LlmGateway for OpenAiGateway {
    async fn complete(
        &self,
        settings: &ModelSettings,
        messages: &[Message],
    ) -> Result<String, GatewayError> {
        let body = Self::build_request(settings, messages);
        debug!("POST {} ({} messages)", self.endpoint(), messages.len());

        let mut request = self.http.post(self.endpoint()).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(map_transport)?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .map(String::from);
            let text = response.text().await.unwrap_or_default();
            return Err(map_status(status, &text, retry_after.as_deref()));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| GatewayError::InvalidResponse("no choices in response".to_string()))
    }
}
