use std::env;

use serde::{Deserialize, Serialize};

use crate::env_or;

fn default_api_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_prompt_cost() -> f64 {
    2.5
}

fn default_completion_cost() -> f64 {
    10.0
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    2
}

/// Completion endpoint and its price table. Costs are USD per million tokens.
#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LlmConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_prompt_cost")]
    pub prompt_cost_per_million: f64,
    #[serde(default = "default_completion_cost")]
    pub completion_cost_per_million: f64,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Extra attempts after a transient failure
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: default_api_url(),
            model: default_model(),
            prompt_cost_per_million: default_prompt_cost(),
            completion_cost_per_million: default_completion_cost(),
            timeout_seconds: default_timeout_seconds(),
            max_retries: default_max_retries(),
        }
    }
}

impl LlmConfig {
    pub fn new() -> Self {
        Self {
            api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            api_url: env::var("LEXIFREE_API_URL").unwrap_or_else(|_| default_api_url()),
            model: env::var("LEXIFREE_MODEL").unwrap_or_else(|_| default_model()),
            prompt_cost_per_million: env_or("LEXIFREE_PROMPT_COST_PER_M", default_prompt_cost()),
            completion_cost_per_million: env_or(
                "LEXIFREE_COMPLETION_COST_PER_M",
                default_completion_cost(),
            ),
            timeout_seconds: env_or("LEXIFREE_TIMEOUT_SECONDS", default_timeout_seconds()),
            max_retries: env_or("LEXIFREE_MAX_RETRIES", default_max_retries()),
        }
    }
}
