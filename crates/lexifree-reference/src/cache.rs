//! Word → reference definitions, backed by an append-only log.
//!
//! Cached words are never refreshed. Only successful scrapes are written, so
//! a word that came back empty is scraped again on its next lookup.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use lexifree_core::AppendLog;
use lexifree_core::jsonl::read_records_if_exists;
use lexifree_types::ReferenceRecord;
use tokio::sync::RwLock;

use crate::{CacheError, ReferenceSource};

pub struct ReferenceCache {
    known: RwLock<HashMap<String, Vec<String>>>,
    log: AppendLog,
    source: Arc<dyn ReferenceSource>,
}

impl ReferenceCache {
    /// Load every cached record into memory and open the log for appends.
    pub async fn open(
        path: impl AsRef<Path>,
        source: Arc<dyn ReferenceSource>,
    ) -> Result<Self, CacheError> {
        let path = path.as_ref();
        let records: Vec<ReferenceRecord> = read_records_if_exists(path)?;

        let known: HashMap<String, Vec<String>> = records
            .into_iter()
            .map(|r| (r.word, r.definitions))
            .collect();
        tracing::info!(
            "Loaded {} cached reference entries from {}",
            known.len(),
            path.display()
        );

        let log = AppendLog::open(path).await?;

        Ok(Self {
            known: RwLock::new(known),
            log,
            source,
        })
    }

    /// Reference definitions for `word` (exact case), scraping on a miss.
    ///
    /// `None` when the scrape failed or found nothing.
    pub async fn lookup(&self, word: &str) -> Option<Vec<String>> {
        let cached = self.known.read().await.get(word).cloned();
        if let Some(defs) = cached {
            tracing::debug!("reference cache hit for \"{}\"", word);
            return Some(defs);
        }

        tracing::debug!(
            "reference cache miss for \"{}\", asking {}",
            word,
            self.source.name()
        );
        let definitions = match self.source.scrape_definitions(word).await {
            Ok(defs) => defs,
            Err(e) => {
                tracing::warn!("reference lookup for \"{}\" failed: {}", word, e);
                return None;
            }
        };

        if definitions.is_empty() {
            return None;
        }

        let mut known = self.known.write().await;
        // Another task may have cached it while we were scraping.
        if let Some(existing) = known.get(word) {
            return Some(existing.clone());
        }

        let record = ReferenceRecord {
            word: word.to_string(),
            definitions,
        };
        if let Err(e) = self.log.append(&record).await {
            tracing::error!("failed to persist reference entry for \"{}\": {}", word, e);
        }
        known.insert(record.word, record.definitions.clone());

        Some(record.definitions)
    }

    pub async fn len(&self) -> usize {
        self.known.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use lexifree_core::jsonl::read_records;

    use super::*;
    use crate::StaticSource;

    #[tokio::test]
    async fn test_hit_skips_the_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("refs.json");
        let source = Arc::new(StaticSource::new().with("cat", &["a small feline"]));
        let cache = ReferenceCache::open(&path, source.clone()).await.unwrap();

        assert_eq!(cache.lookup("cat").await, Some(vec!["a small feline".to_string()]));
        assert_eq!(cache.lookup("cat").await, Some(vec!["a small feline".to_string()]));
        assert_eq!(source.lookups_of("cat"), 1);

        let on_disk: Vec<ReferenceRecord> = read_records(&path).unwrap();
        assert_eq!(on_disk.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_scrape_is_not_cached_and_is_retried() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("refs.json");
        let source = Arc::new(StaticSource::new());
        let cache = ReferenceCache::open(&path, source.clone()).await.unwrap();

        assert_eq!(cache.lookup("zzq").await, None);
        assert_eq!(cache.lookup("zzq").await, None);
        assert_eq!(source.lookups_of("zzq"), 2);

        let on_disk: Vec<ReferenceRecord> = read_records(&path).unwrap();
        assert!(on_disk.is_empty());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_keys_are_case_sensitive_and_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("refs.json");
        let source = Arc::new(StaticSource::new().with("Polish", &["of Poland"]));

        {
            let cache = ReferenceCache::open(&path, source.clone()).await.unwrap();
            assert!(cache.lookup("Polish").await.is_some());
            assert!(cache.lookup("polish").await.is_none());
        }

        let reopened = ReferenceCache::open(&path, Arc::new(StaticSource::new()))
            .await
            .unwrap();
        assert_eq!(reopened.lookup("Polish").await, Some(vec!["of Poland".to_string()]));
        assert_eq!(reopened.len().await, 1);
    }
}
