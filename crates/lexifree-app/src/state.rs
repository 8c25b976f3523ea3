use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use lexifree_config::Config;
use lexifree_core::RateTable;
use lexifree_llm::{Completer, OpenAiCompleter};
use lexifree_reference::{GoogleDefinitions, ReferenceCache};

pub struct AppState {
    pub config: Config,
    pub rates: RateTable,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let rates = RateTable::per_million(
            config.llm.prompt_cost_per_million,
            config.llm.completion_cost_per_million,
        );
        Self { config, rates }
    }

    pub fn entries_path(&self) -> PathBuf {
        PathBuf::from(&self.config.storage.entries_path)
    }

    pub fn wordlist_path(&self) -> PathBuf {
        PathBuf::from(&self.config.storage.wordlist_path)
    }

    /// The configured completion provider. Fails when no API key is set.
    pub fn completer(&self) -> anyhow::Result<Arc<dyn Completer>> {
        let llm = &self.config.llm;
        if llm.api_key.is_empty() {
            anyhow::bail!("OPENAI_API_KEY is not set");
        }

        let completer = OpenAiCompleter::new(llm.api_key.clone(), llm.api_url.clone(), llm.model.clone())
            .with_timeout(Duration::from_secs(llm.timeout_seconds))
            .with_max_retries(llm.max_retries);
        tracing::info!("Using model {} at {}", llm.model, llm.api_url);

        Ok(Arc::new(completer))
    }

    pub async fn reference_cache(&self) -> anyhow::Result<Arc<ReferenceCache>> {
        let path = &self.config.storage.reference_cache_path;
        let cache = ReferenceCache::open(path, Arc::new(GoogleDefinitions::new()))
            .await
            .with_context(|| format!("opening reference cache {path}"))?;
        Ok(Arc::new(cache))
    }
}
