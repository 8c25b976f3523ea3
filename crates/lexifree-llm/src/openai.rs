use std::time::Duration;

use async_trait::async_trait;
use lexifree_types::Usage;
use serde::{Deserialize, Serialize};

use crate::{CompleteError, Completer, Completion, ProviderMetadata};

const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

#[derive(Clone)]
pub struct OpenAiCompleter {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    model: String,
    timeout: Duration,
    max_retries: u32,
}

impl OpenAiCompleter {
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_url,
            model,
            timeout: Duration::from_secs(60),
            max_retries: 2,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    async fn send_once(&self, prompt: &str, structured: bool) -> Result<Completion, CompleteError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            response_format: structured.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == 429 {
            return Err(CompleteError::RateLimitExceeded);
        }

        if status == 401 || status == 403 {
            return Err(CompleteError::AuthenticationError);
        }

        if status.is_server_error() {
            return Err(CompleteError::ServerError(status.as_u16()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompleteError::ApiError(format!("HTTP {}: {}", status, body)));
        }

        let body: ChatResponse = response.json().await.map_err(|e| {
            CompleteError::ApiError(format!("Failed to parse response: {}", e))
        })?;

        let text = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| CompleteError::ApiError("No completion in response".to_string()))?;

        let usage = body
            .usage
            .map(|u| Usage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        Ok(Completion { text, usage })
    }
}

#[async_trait]
impl Completer for OpenAiCompleter {
    async fn complete(&self, prompt: &str, structured: bool) -> Result<Completion, CompleteError> {
        if self.api_key.is_empty() {
            return Err(CompleteError::AuthenticationError);
        }

        let mut attempt = 0;
        loop {
            match self.send_once(prompt, structured).await {
                Ok(completion) => return Ok(completion),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    let backoff = Duration::from_millis(500 * u64::from(attempt));
                    tracing::warn!(
                        "completion attempt {} failed ({}), retrying in {:?}",
                        attempt,
                        e,
                        backoff
                    );
                    tokio::time::sleep(backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "OpenAI".to_string(),
            model: self.model.clone(),
            requires_api_key: true,
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<ResponseUsage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ResponseUsage {
    prompt_tokens: u64,
    completion_tokens: u64,
}
