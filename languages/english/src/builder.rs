//! One persisted outcome per requested word.
//!
//! A build walks the redirect chain explicitly: each derived word gets a
//! `base_word` record and the walk moves on to its root, until a word ends
//! in an entry or an error. Every record carries the cost of its own calls.

use std::collections::HashSet;
use std::sync::Arc;

use lexifree_core::RateTable;
use lexifree_core::prompt::render;
use lexifree_core::reply::parse_object;
use lexifree_llm::Completer;
use lexifree_reference::ReferenceCache;
use lexifree_types::{DictionaryEntry, Outcome, Resolution, WordEntry};
use serde_json::Value;
use tokio::sync::RwLock;

use crate::derivation::{Derivation, check_if_derived};
use crate::errors;
use crate::gate::is_english_word;
use crate::poetic::add_poetic_definitions;
use crate::prompts::{DICTIONARY_ENTRY, VERSION};
use crate::rephrase::rephrase_similar;
use crate::session::Session;

/// Records produced for one requested word, in emission order.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub records: Vec<WordEntry>,
    pub resolution: Resolution,
}

enum Step {
    Redirect { record: WordEntry, root: String },
    Done(WordEntry),
}

pub struct EntryBuilder {
    completer: Arc<dyn Completer>,
    references: Arc<ReferenceCache>,
    rates: RateTable,
    version: String,
    /// Canonical words that already have a full entry.
    resolved: RwLock<HashSet<String>>,
}

impl EntryBuilder {
    pub fn new(
        completer: Arc<dyn Completer>,
        references: Arc<ReferenceCache>,
        rates: RateTable,
    ) -> Self {
        Self {
            completer,
            references,
            rates,
            version: VERSION.to_string(),
            resolved: RwLock::new(HashSet::new()),
        }
    }

    /// Seed the words a redirect may land on without being rebuilt.
    pub fn with_resolved(mut self, words: impl IntoIterator<Item = String>) -> Self {
        self.resolved.get_mut().extend(words);
        self
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub async fn build_entry(&self, word: &str) -> BuildOutcome {
        let mut records = Vec::new();
        let mut visited = HashSet::new();
        let mut current = word.to_string();

        loop {
            if !visited.insert(current.clone()) {
                tracing::warn!("derivation of \"{}\" came back to \"{}\"", word, current);
                records.push(WordEntry::failed(
                    &current,
                    &self.version,
                    errors::DERIVATION_CYCLE,
                ));
                return BuildOutcome {
                    records,
                    resolution: Resolution::Cycle(current),
                };
            }

            // Only redirect targets are reused; the requested word is always built.
            if current != word && self.resolved.read().await.contains(&current) {
                tracing::debug!("\"{}\" already has an entry, not rebuilding", current);
                return BuildOutcome {
                    records,
                    resolution: Resolution::Resolved(current),
                };
            }

            match self.build_one(&current).await {
                Step::Redirect { record, root } => {
                    tracing::debug!("\"{}\" redirects to \"{}\"", current, root);
                    records.push(record);
                    current = root;
                }
                Step::Done(record) => {
                    let resolution = match &record.outcome {
                        Outcome::Entry { .. } => {
                            self.resolved.write().await.insert(current.clone());
                            Resolution::Resolved(current)
                        }
                        Outcome::Failed { error, .. } => Resolution::Failed {
                            word: current,
                            reason: error.clone(),
                        },
                        Outcome::Redirect { base_word } => Resolution::Failed {
                            word: current,
                            reason: format!("unexpected redirect to {base_word}"),
                        },
                    };
                    records.push(record);
                    return BuildOutcome {
                        records,
                        resolution,
                    };
                }
            }
        }
    }

    async fn build_one(&self, word: &str) -> Step {
        let mut session = Session::new(self.completer.as_ref(), self.rates);
        let version = self.version.as_str();

        if !is_english_word(&mut session, word).await {
            let cost = session.take_cost();
            return Step::Done(WordEntry::failed(word, version, errors::NOT_ENGLISH).with_cost(cost));
        }

        if let Derivation::Derived(root) = check_if_derived(&mut session, word).await {
            let record = WordEntry::redirect(word, version, &root).with_cost(session.take_cost());
            return Step::Redirect { record, root };
        }

        let prompt = render(DICTIONARY_ENTRY, &[("WORD", word)]);
        let reply = session.ask(&prompt, true).await;
        let Some(mut entry) = parse_entry(word, &reply) else {
            let cost = session.take_cost();
            return Step::Done(
                WordEntry::failed(word, version, errors::ENTRY_NOT_DICT).with_cost(cost),
            );
        };
        entry.normalize(word);

        if let Some(references) = self.references.lookup(word).await {
            let rewritten = rephrase_similar(&mut session, word, &mut entry, &references).await;
            if rewritten > 0 {
                tracing::info!("rephrased {} definition(s) of \"{}\"", rewritten, word);
            }
        }

        let poetic = add_poetic_definitions(&mut session, &mut entry).await;
        let cost = session.take_cost();

        match poetic {
            Ok(count) => {
                tracing::info!(
                    "built \"{}\": {} definitions, {} poetic, ${:.4}",
                    word,
                    entry.definitions.len(),
                    count,
                    cost
                );
                Step::Done(WordEntry::resolved(word, version, entry).with_cost(cost))
            }
            Err(_) => {
                tracing::warn!("poetic stage failed for \"{}\", keeping base entry", word);
                Step::Done(WordEntry {
                    word: word.to_string(),
                    version: version.to_string(),
                    cost,
                    outcome: Outcome::Failed {
                        error: errors::POETIC_NOT_LIST.to_string(),
                        entry: Some(entry),
                    },
                })
            }
        }
    }
}

fn parse_entry(word: &str, reply: &str) -> Option<DictionaryEntry> {
    let object = parse_object(reply)?;
    match serde_json::from_value(Value::Object(object)) {
        Ok(entry) => Some(entry),
        Err(e) => {
            tracing::warn!("entry for \"{}\" has an unexpected shape: {}", word, e);
            None
        }
    }
}
