use async_trait::async_trait;
use lexifree_types::{TestBody, TestRecord};
use reqwest::Url;
use serde::Deserialize;

use crate::html::text_content;
use crate::{ReferenceSource, ScrapeError};

const API_URL: &str = "https://en.wiktionary.org/api/rest_v1/page/definition";

/// Definitions that are only citation back-links carry this class.
const CITATION_MARKER: &str = "mw-cite-backlink";

#[derive(Debug, Deserialize)]
struct DefinitionPage {
    #[serde(default)]
    en: Option<Vec<UsageBlock>>,
}

#[derive(Debug, Deserialize)]
struct UsageBlock {
    #[serde(rename = "partOfSpeech", default)]
    part_of_speech: String,
    #[serde(default)]
    definitions: Vec<DefinitionHtml>,
}

#[derive(Debug, Deserialize)]
struct DefinitionHtml {
    #[serde(default)]
    definition: String,
}

/// Client for the Wiktionary REST definition endpoint.
#[derive(Clone)]
pub struct WiktionaryClient {
    client: reqwest::Client,
    base_url: String,
}

impl WiktionaryClient {
    pub fn new() -> Self {
        Self::with_base_url(API_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Look up `word`, retrying once with a capital first letter when the
    /// lowercase form has no English definitions.
    ///
    /// The returned record names the spelling that succeeded.
    pub async fn lookup(&self, word: &str) -> Option<TestRecord> {
        let mut candidates = vec![word.to_string()];
        if let Some(capitalized) = capitalize_lowercase(word) {
            candidates.push(capitalized);
        }

        for candidate in candidates {
            match self.fetch(&candidate).await {
                Ok(Some(definitions)) => {
                    return Some(TestRecord {
                        word: candidate,
                        body: TestBody::Defined {
                            wiktionary_definitions: definitions,
                        },
                    });
                }
                Ok(None) => tracing::debug!("no English block for \"{}\"", candidate),
                Err(e) => tracing::debug!("wiktionary lookup of \"{}\" failed: {}", candidate, e),
            }
        }

        tracing::warn!("no wiktionary definitions for \"{}\"", word);
        None
    }

    /// `word` becomes one percent-encoded path segment.
    fn definition_url(&self, word: &str) -> Result<Url, ScrapeError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ScrapeError::Layout(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ScrapeError::Layout(format!("{} cannot take a path", self.base_url)))?
            .pop_if_empty()
            .push(word);
        Ok(url)
    }

    async fn fetch(&self, word: &str) -> Result<Option<Vec<String>>, ScrapeError> {
        let url = self.definition_url(word)?;
        let response = self
            .client
            .get(url)
            .query(&[("redirect", "false")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ScrapeError::Http(response.status().as_u16()));
        }

        let page: DefinitionPage = response
            .json()
            .await
            .map_err(|e| ScrapeError::Layout(e.to_string()))?;

        Ok(english_definitions(page))
    }
}

impl Default for WiktionaryClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReferenceSource for WiktionaryClient {
    async fn scrape_definitions(&self, word: &str) -> Result<Vec<String>, ScrapeError> {
        Ok(self.fetch(word).await?.unwrap_or_default())
    }

    fn name(&self) -> &str {
        "wiktionary"
    }
}

/// Flatten the English blocks into "<part of speech> <text>" strings.
fn english_definitions(page: DefinitionPage) -> Option<Vec<String>> {
    let blocks = page.en?;

    let definitions = blocks
        .iter()
        .flat_map(|block| {
            block
                .definitions
                .iter()
                .filter(|d| !d.definition.trim().is_empty())
                .filter(|d| !d.definition.contains(CITATION_MARKER))
                .map(move |d| format!("{} {}", block.part_of_speech, text_content(&d.definition)))
        })
        .collect();

    Some(definitions)
}

fn capitalize_lowercase(word: &str) -> Option<String> {
    let mut chars = word.chars();
    let first = chars.next()?;
    if !first.is_lowercase() {
        return None;
    }
    Some(first.to_uppercase().chain(chars).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_blocks_are_flattened_with_part_of_speech() {
        let page: DefinitionPage = serde_json::from_str(
            r#"{
                "en": [
                    {"partOfSpeech": "Noun", "definitions": [
                        {"definition": "A <a href=\"/wiki/domestic\">domesticated</a> feline."},
                        {"definition": "  "},
                        {"definition": "<span class=\"mw-cite-backlink\">^</span> ref"}
                    ]},
                    {"partOfSpeech": "Verb", "definitions": [
                        {"definition": "To hoist an anchor."}
                    ]}
                ],
                "fr": []
            }"#,
        )
        .unwrap();

        let defs = english_definitions(page).unwrap();
        assert_eq!(
            defs,
            vec![
                "Noun A domesticated feline.".to_string(),
                "Verb To hoist an anchor.".to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_english_block_is_none() {
        let page: DefinitionPage = serde_json::from_str(r#"{"de": []}"#).unwrap();
        assert!(english_definitions(page).is_none());
    }

    #[test]
    fn test_word_is_one_encoded_path_segment() {
        let client = WiktionaryClient::new();
        assert_eq!(
            client.definition_url("AC/DC?#").unwrap().as_str(),
            "https://en.wiktionary.org/api/rest_v1/page/definition/AC%2FDC%3F%23"
        );

        let trailing = WiktionaryClient::with_base_url("http://127.0.0.1:8080/definition/".to_string());
        assert_eq!(
            trailing.definition_url("cat").unwrap().as_str(),
            "http://127.0.0.1:8080/definition/cat"
        );
    }

    #[test]
    fn test_only_lowercase_words_get_a_capitalized_retry() {
        assert_eq!(capitalize_lowercase("paris"), Some("Paris".to_string()));
        assert_eq!(capitalize_lowercase("Paris"), None);
        assert_eq!(capitalize_lowercase(""), None);
    }
}
