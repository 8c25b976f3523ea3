use std::env;

use serde::{Deserialize, Serialize};

use crate::env_or;

fn default_workers() -> usize {
    20
}

fn default_max_words() -> usize {
    100
}

fn default_review_addr() -> String {
    "127.0.0.1:8080".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct EvalConfig {
    /// Definition checks in flight at once
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Evaluation is cut to this many words, in test-file order
    #[serde(default = "default_max_words")]
    pub max_words: usize,
    /// Bind address of the manual review server
    #[serde(default = "default_review_addr")]
    pub review_addr: String,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            max_words: default_max_words(),
            review_addr: default_review_addr(),
        }
    }
}

impl EvalConfig {
    pub fn new() -> Self {
        Self {
            workers: env_or("LEXIFREE_EVAL_WORKERS", default_workers()).max(1),
            max_words: env_or("LEXIFREE_EVAL_MAX_WORDS", default_max_words()),
            review_addr: env::var("LEXIFREE_REVIEW_ADDR").unwrap_or_else(|_| default_review_addr()),
        }
    }
}
