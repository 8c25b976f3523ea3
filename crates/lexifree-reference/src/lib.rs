pub mod cache;
pub mod google;
pub mod html;
pub mod source;
pub mod wiktionary;

pub use cache::ReferenceCache;
pub use google::GoogleDefinitions;
pub use source::{ReferenceSource, StaticSource};
pub use wiktionary::WiktionaryClient;

use lexifree_core::LogError;

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Http(u16),

    #[error("Unexpected page layout: {0}")]
    Layout(String),
}

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error(transparent)]
    Log(#[from] LogError),
}
