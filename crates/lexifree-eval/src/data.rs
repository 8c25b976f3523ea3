use std::collections::HashMap;
use std::path::Path;

use lexifree_core::jsonl::read_records;
use lexifree_types::{DictionaryEntry, Outcome, TestBody, TestRecord, WordEntry};

use crate::EvalError;

#[derive(Debug, Clone)]
pub struct AiEntry {
    pub version: String,
    pub entry: DictionaryEntry,
}

/// AI entries joined with the reference definitions of a test set.
#[derive(Debug, Clone, Default)]
pub struct EvalData {
    pub ai: HashMap<String, AiEntry>,
    pub ai_errors: HashMap<String, String>,
    /// Test words with an AI entry, in test file order.
    pub reference: Vec<(String, Vec<String>)>,
}

impl EvalData {
    pub fn words(&self) -> Vec<String> {
        self.reference.iter().map(|(w, _)| w.clone()).collect()
    }

    pub fn ai_definitions(&self, word: &str) -> Vec<String> {
        self.ai
            .get(word)
            .map(|ai| ai.entry.definition_texts())
            .unwrap_or_default()
    }

    pub fn reference_definitions(&self, word: &str) -> Option<&[String]> {
        self.reference
            .iter()
            .find(|(w, _)| w == word)
            .map(|(_, defs)| defs.as_slice())
    }
}

/// Load the entry log and a test file, keeping the first `max_words` test
/// words that have a successful AI entry.
///
/// Later records of a word replace earlier ones. Redirect records are
/// ignored; a word that never reaches an entry simply has no AI data.
pub fn load_data(
    entries_path: &Path,
    test_file: &Path,
    max_words: usize,
) -> Result<EvalData, EvalError> {
    let mut data = EvalData::default();

    for record in read_records::<WordEntry>(entries_path)? {
        match record.outcome {
            Outcome::Entry { entry } => {
                data.ai_errors.remove(&record.word);
                data.ai.insert(
                    record.word,
                    AiEntry {
                        version: record.version,
                        entry,
                    },
                );
            }
            Outcome::Failed { error, .. } => {
                data.ai.remove(&record.word);
                data.ai_errors.insert(record.word, error);
            }
            Outcome::Redirect { .. } => {}
        }
    }

    let mut reference: Vec<(String, Vec<String>)> = Vec::new();
    for record in read_records::<TestRecord>(test_file)? {
        let TestBody::Defined {
            wiktionary_definitions,
        } = record.body
        else {
            continue;
        };
        match reference.iter_mut().find(|(w, _)| *w == record.word) {
            Some((_, defs)) => *defs = wiktionary_definitions,
            None => reference.push((record.word, wiktionary_definitions)),
        }
    }

    data.reference = reference
        .into_iter()
        .filter(|(word, _)| data.ai.contains_key(word))
        .take(max_words)
        .collect();

    if data.reference.is_empty() {
        return Err(EvalError::NoOverlap {
            test_file: test_file.to_path_buf(),
        });
    }

    tracing::info!(
        "evaluating {} words ({} AI entries, {} AI errors loaded)",
        data.reference.len(),
        data.ai.len(),
        data.ai_errors.len()
    );

    Ok(data)
}
