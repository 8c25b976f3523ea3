use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use lexifree_core::AppendLog;
use lexifree_core::jsonl::{read_records, read_records_if_exists};
use lexifree_core::preprocess::prepare_words;
use lexifree_lang_english::EntryBuilder;
use lexifree_types::WordEntry;
use serde::Deserialize;

use crate::cli::{BuildArgs, WordSource};
use crate::controller::BatchController;
use crate::state::AppState;

#[derive(Deserialize)]
struct WordLine {
    word: String,
}

pub async fn run(state: &AppState, args: BuildArgs) -> anyhow::Result<()> {
    let mut words = load_words(&args.source, &state.wordlist_path())?;
    let entries_path = state.entries_path();

    let mut known_roots = Vec::new();
    if args.keep {
        let existing: Vec<WordEntry> = read_records_if_exists(&entries_path)
            .with_context(|| format!("reading {}", entries_path.display()))?;
        let before = words.len();
        words = skip_existing(words, &existing);
        tracing::info!("Skipping {} words that already have records", before - words.len());
        known_roots = existing
            .iter()
            .filter(|r| r.entry().is_some())
            .map(|r| r.word.clone())
            .collect();
    }

    if words.is_empty() {
        tracing::info!("Nothing to build");
        return Ok(());
    }

    let builder = EntryBuilder::new(state.completer()?, state.reference_cache().await?, state.rates)
        .with_resolved(known_roots);
    let log = AppendLog::open(&entries_path)
        .await
        .with_context(|| format!("opening {}", entries_path.display()))?;

    let controller = BatchController::new(Arc::new(builder), &state.config.batch);
    let cancel = controller.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    let status = controller.run(words, log).await?;
    if status.done < status.total {
        tracing::warn!("Stopped after {} of {} words", status.done, status.total);
    }
    Ok(())
}

/// Words to build, trimmed and normalized, in source order.
pub fn load_words(source: &WordSource, wordlist: &Path) -> anyhow::Result<Vec<String>> {
    let raw = match source {
        WordSource::Range { start, end } => {
            if start >= end {
                anyhow::bail!("expected START < END, got [{start}, {end})");
            }
            unigram_range(wordlist, *start, *end)?
        }
        WordSource::File { path } => {
            if path.extension().is_some_and(|ext| ext == "json") {
                read_records::<WordLine>(path)?
                    .into_iter()
                    .map(|line| line.word)
                    .collect()
            } else {
                fs::read_to_string(path)
                    .with_context(|| format!("reading word list {}", path.display()))?
                    .lines()
                    .map(str::to_string)
                    .collect()
            }
        }
        WordSource::Word { word } => vec![word.clone()],
    };

    Ok(prepare_words(raw))
}

/// Words [start, end) of the unigram CSV, header excluded.
fn unigram_range(path: &Path, start: usize, end: usize) -> anyhow::Result<Vec<String>> {
    tracing::info!("Loading word list from {}", path.display());
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening word list {}", path.display()))?;

    let mut words = Vec::with_capacity(end - start);
    for row in reader.records().skip(start).take(end - start) {
        let row = row?;
        if let Some(word) = row.get(0) {
            words.push(word.to_string());
        }
    }
    Ok(words)
}

/// Drop words with any record in `existing`, matched on the exact string.
pub fn skip_existing(words: Vec<String>, existing: &[WordEntry]) -> Vec<String> {
    let seen: HashSet<&str> = existing.iter().map(|r| r.word.as_str()).collect();
    words
        .into_iter()
        .filter(|w| !seen.contains(w.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_range_reads_rows_after_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("unigram_freq.csv");
        fs::write(&path, "word,count\nthe,100\nof,90\nand,80\nto,70\n").unwrap();

        let words = load_words(&WordSource::Range { start: 1, end: 3 }, &path).unwrap();
        assert_eq!(words, vec!["of".to_string(), "and".to_string()]);

        assert!(load_words(&WordSource::Range { start: 3, end: 3 }, &path).is_err());
    }

    #[test]
    fn test_json_and_text_lists() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("words.json");
        fs::write(&json, "{\"word\": \"cat\", \"wiktionary_definitions\": []}\n{\"word\": \" dog \"}\n").unwrap();
        let txt = dir.path().join("words.txt");
        fs::write(&txt, "cat\r\n\n  dog\n").unwrap();

        let expected = vec!["cat".to_string(), "dog".to_string()];
        assert_eq!(load_words(&WordSource::File { path: json }, Path::new("unused")).unwrap(), expected);
        assert_eq!(load_words(&WordSource::File { path: txt }, Path::new("unused")).unwrap(), expected);
        assert_eq!(
            load_words(&WordSource::Word { word: "eon".into() }, &PathBuf::from("unused")).unwrap(),
            vec!["eon".to_string()]
        );
    }

    #[test]
    fn test_skip_matches_exact_word_of_any_record() {
        let existing = vec![
            WordEntry::failed("xq", "0.2", "not an English word"),
            WordEntry::redirect("cats", "0.2", "cat"),
        ];
        let words = vec!["xq".to_string(), "cats".to_string(), "Cats".to_string(), "cat".to_string()];

        assert_eq!(
            skip_existing(words, &existing),
            vec!["Cats".to_string(), "cat".to_string()]
        );
    }
}
