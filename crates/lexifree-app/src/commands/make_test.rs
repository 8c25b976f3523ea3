use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use lexifree_core::jsonl::to_line;
use lexifree_reference::WiktionaryClient;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cli::MakeTestArgs;
use crate::commands::output;
use crate::state::AppState;

/// Raw CSV rows (header included) eligible for sampling.
const MIN_ROW: usize = 1_000;
const MAX_ROW: usize = 100_000;

/// Some sampled words have no Wiktionary entry.
const OVERSAMPLE: f64 = 1.5;

pub async fn run(state: &AppState, args: MakeTestArgs) -> anyhow::Result<()> {
    let seed = args
        .seed
        .unwrap_or_else(|| rand::thread_rng().gen_range(1..=100_000));
    tracing::info!("Using the seed {}.", seed);

    let candidates = load_candidates(&state.wordlist_path())?;
    let picks = sample_words(&candidates, args.count, seed)?;
    let mut out = output(args.out.as_deref())?;

    if !args.wiktionary {
        for word in picks.iter().take(args.count) {
            writeln!(out, "{word}")?;
        }
        out.flush()?;
        return Ok(());
    }

    let client = WiktionaryClient::new();
    let mut written = 0;
    for word in &picks {
        if written == args.count {
            break;
        }
        let Some(record) = client.lookup(word).await else {
            continue;
        };
        out.write_all(to_line(&record)?.as_bytes())?;
        written += 1;
        tracing::info!("[{}/{}] {}", written, args.count, record.word);
    }
    out.flush()?;

    if written < args.count {
        tracing::warn!(
            "Only {} of {} sampled words had Wiktionary definitions",
            written,
            args.count
        );
    }
    Ok(())
}

/// (word, count) for CSV rows [MIN_ROW, MAX_ROW).
fn load_candidates(path: &Path) -> anyhow::Result<Vec<(String, f64)>> {
    let file = File::open(path).with_context(|| format!("opening word list {}", path.display()))?;
    let mut reader = csv::ReaderBuilder::new().has_headers(false).from_reader(file);

    let mut candidates = Vec::new();
    for row in reader.records().skip(MIN_ROW).take(MAX_ROW - MIN_ROW) {
        let row = row?;
        let (Some(word), Some(count)) = (row.get(0), row.get(1)) else {
            continue;
        };
        let count: f64 = count
            .trim()
            .parse()
            .with_context(|| format!("bad count {count:?} for {word:?}"))?;
        candidates.push((word.to_string(), count));
    }

    if candidates.is_empty() {
        anyhow::bail!("{} has no rows past row {}", path.display(), MIN_ROW);
    }
    Ok(candidates)
}

/// Draw `count * 1.5` words, with replacement, weighted by frequency.
fn sample_words(candidates: &[(String, f64)], count: usize, seed: u64) -> anyhow::Result<Vec<String>> {
    let weights = WeightedIndex::new(candidates.iter().map(|(_, count)| *count))?;
    let mut rng = StdRng::seed_from_u64(seed);
    let draws = (count as f64 * OVERSAMPLE).ceil() as usize;

    Ok((0..draws)
        .map(|_| candidates[weights.sample(&mut rng)].0.clone())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Vec<(String, f64)> {
        vec![
            ("common".to_string(), 1000.0),
            ("rare".to_string(), 1.0),
            ("never".to_string(), 0.0),
        ]
    }

    #[test]
    fn test_same_seed_same_sample() {
        let a = sample_words(&candidates(), 10, 42).unwrap();
        let b = sample_words(&candidates(), 10, 42).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 15);
        assert!(a.iter().all(|w| w != "never"));
    }

    #[test]
    fn test_candidates_skip_leading_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("unigram_freq.csv");
        let mut csv = String::from("word,count\n");
        for i in 1..=1_002 {
            csv.push_str(&format!("w{i},{}\n", 5_000 - i));
        }
        std::fs::write(&path, csv).unwrap();

        let rows = load_candidates(&path).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], ("w1000".to_string(), 4_000.0));
    }
}
