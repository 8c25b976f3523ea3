use std::env;

use serde::{Deserialize, Serialize};

fn default_entries_path() -> String {
    "entries.json".to_string()
}

fn default_reference_cache_path() -> String {
    "google_defs.json".to_string()
}

fn default_wordlist_path() -> String {
    "unigram_freq.csv".to_string()
}

/// Locations of the append-only logs and the unigram word list.
#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    #[serde(default = "default_entries_path")]
    pub entries_path: String,
    #[serde(default = "default_reference_cache_path")]
    pub reference_cache_path: String,
    #[serde(default = "default_wordlist_path")]
    pub wordlist_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            entries_path: default_entries_path(),
            reference_cache_path: default_reference_cache_path(),
            wordlist_path: default_wordlist_path(),
        }
    }
}

impl StorageConfig {
    pub fn new() -> Self {
        Self {
            entries_path: env::var("LEXIFREE_ENTRIES").unwrap_or_else(|_| default_entries_path()),
            reference_cache_path: env::var("LEXIFREE_REFERENCE_CACHE")
                .unwrap_or_else(|_| default_reference_cache_path()),
            wordlist_path: env::var("LEXIFREE_WORDLIST").unwrap_or_else(|_| default_wordlist_path()),
        }
    }
}
