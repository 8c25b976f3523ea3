use lexifree_types::Usage;

pub mod openai;
pub mod scripted;

pub use openai::OpenAiCompleter;
pub use scripted::ScriptedCompleter;

/// Chat-completion provider interface
#[async_trait::async_trait]
pub trait Completer: Send + Sync {
    /// Send one prompt. With `structured` set the provider is asked for a
    /// bare JSON object.
    async fn complete(&self, prompt: &str, structured: bool) -> Result<Completion, CompleteError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub usage: Usage,
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub model: String,
    pub requires_api_key: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum CompleteError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Server error: HTTP {0}")]
    ServerError(u16),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,
}

impl CompleteError {
    /// Failures worth another attempt
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            CompleteError::NetworkError(_)
                | CompleteError::ServerError(_)
                | CompleteError::RateLimitExceeded
        )
    }
}
