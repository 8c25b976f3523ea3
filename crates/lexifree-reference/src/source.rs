use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::ScrapeError;

/// Third-party definitions for a word, fetched over the network.
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    /// All definitions found for `word`; empty when the page has none.
    async fn scrape_definitions(&self, word: &str) -> Result<Vec<String>, ScrapeError>;

    /// Source name for logs
    fn name(&self) -> &str;
}

/// In-memory source, used offline and in tests. Counts its lookups.
#[derive(Default)]
pub struct StaticSource {
    definitions: HashMap<String, Vec<String>>,
    lookups: Mutex<Vec<String>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, word: &str, definitions: &[&str]) -> Self {
        self.definitions.insert(
            word.to_string(),
            definitions.iter().map(|d| d.to_string()).collect(),
        );
        self
    }

    pub fn lookups_of(&self, word: &str) -> usize {
        self.lookups
            .lock()
            .map(|l| l.iter().filter(|w| *w == word).count())
            .unwrap_or(0)
    }
}

#[async_trait]
impl ReferenceSource for StaticSource {
    async fn scrape_definitions(&self, word: &str) -> Result<Vec<String>, ScrapeError> {
        if let Ok(mut lookups) = self.lookups.lock() {
            lookups.push(word.to_string());
        }
        Ok(self.definitions.get(word).cloned().unwrap_or_default())
    }

    fn name(&self) -> &str {
        "static"
    }
}
