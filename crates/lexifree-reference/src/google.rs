use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use crate::html::text_content;
use crate::{ReferenceSource, ScrapeError};

const URL_PREFIX: &str = "https://googledictionary.freecollocation.com/meaning";

/// Everything below this heading is crowd-sourced web text, not dictionary
/// definitions.
const WEB_DEFINITIONS_MARKER: &str = "Web Definitions:";

static DECIMAL_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<li[^>]*style\s*=\s*["']list-style:\s*decimal;?["'][^>]*>(.*?)(?:<|$)"#)
        .unwrap()
});

/// Scraper for the Google dictionary widget mirror.
#[derive(Clone)]
pub struct GoogleDefinitions {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleDefinitions {
    pub fn new() -> Self {
        Self::with_base_url(URL_PREFIX.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }
}

impl Default for GoogleDefinitions {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReferenceSource for GoogleDefinitions {
    async fn scrape_definitions(&self, word: &str) -> Result<Vec<String>, ScrapeError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("word", word)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ScrapeError::Http(response.status().as_u16()));
        }

        let html = response.text().await?;
        Ok(extract_definitions(&html))
    }

    fn name(&self) -> &str {
        "google"
    }
}

/// Pull the numbered definition items out of a result page.
///
/// Only the leading text of each item counts; nested example blocks and
/// everything after the web-definitions heading are ignored.
pub fn extract_definitions(html: &str) -> Vec<String> {
    let dictionary_part = html
        .find(WEB_DEFINITIONS_MARKER)
        .map_or(html, |end| &html[..end]);

    DECIMAL_ITEM_RE
        .captures_iter(dictionary_part)
        .filter_map(|caps| caps.get(1))
        .map(|m| text_content(m.as_str()))
        .filter(|text| !text.is_empty())
        .collect()
}
