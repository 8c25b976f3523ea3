use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use self::batch::BatchConfig;
use self::eval::EvalConfig;
use self::llm::LlmConfig;
use self::storage::StorageConfig;

pub mod batch;
pub mod eval;
pub mod llm;
pub mod storage;

#[derive(Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub llm: LlmConfig,
    pub storage: StorageConfig,
    pub batch: BatchConfig,
    pub eval: EvalConfig,
}

impl Config {
    /// Build the config from the environment, falling back to defaults for
    /// anything unset or unparsable.
    pub fn new() -> Self {
        Config {
            llm: LlmConfig::new(),
            storage: StorageConfig::new(),
            batch: BatchConfig::new(),
            eval: EvalConfig::new(),
        }
    }
}

/// Parse `key` from the environment, or use `default`.
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"llm": {"model": "gpt-4o-mini"}, "eval": {"workers": 4}}"#)
                .unwrap();

        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.prompt_cost_per_million, 2.5);
        assert_eq!(config.eval.workers, 4);
        assert_eq!(config.eval.max_words, 100);
        assert_eq!(config.batch.workers, 200);
        assert_eq!(config.storage.entries_path, "entries.json");
    }

    #[test]
    fn test_env_or_falls_back_on_garbage() {
        assert_eq!(env_or("LEXIFREE_TEST_UNSET_KEY_FOR_CONFIG", 7u32), 7);
    }
}
