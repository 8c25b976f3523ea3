use lexifree_core::jsonl::read_records;
use lexifree_types::{DictionaryEntry, Outcome, WordEntry};

use crate::cli::ShowArgs;
use crate::state::AppState;

/// The latest entry, error and redirect recorded for a word.
#[derive(Debug, Default)]
pub struct Findings<'a> {
    pub entry: Option<&'a DictionaryEntry>,
    pub error: Option<&'a str>,
    pub base_word: Option<&'a str>,
}

pub fn run(state: &AppState, args: ShowArgs) -> anyhow::Result<()> {
    let word = args.word.join(" ");
    let records: Vec<WordEntry> = read_records(&state.entries_path())?;
    let found = find(&records, &word);

    if let Some(entry) = found.entry {
        println!("Entry:");
        println!("{}", serde_json::to_string_pretty(entry)?);
    }
    if let Some(error) = found.error {
        println!("Error info:");
        println!("{}", serde_json::to_string_pretty(error)?);
    }
    if let Some(base) = found.base_word {
        println!("Redirects to: {base}");
    }
    if found.entry.is_none() && found.error.is_none() && found.base_word.is_none() {
        println!("No entry or error found for \"{word}\" (case-insensitive)");
    }
    Ok(())
}

/// Case-insensitive lookup; later records win.
pub fn find<'a>(records: &'a [WordEntry], word: &str) -> Findings<'a> {
    let wanted = word.to_lowercase();
    let mut found = Findings::default();

    for record in records.iter().filter(|r| r.word.to_lowercase() == wanted) {
        match &record.outcome {
            Outcome::Entry { entry } => found.entry = Some(entry),
            Outcome::Failed { error, entry } => {
                found.error = Some(error.as_str());
                if let Some(entry) = entry {
                    found.entry = Some(entry);
                }
            }
            Outcome::Redirect { base_word } => found.base_word = Some(base_word.as_str()),
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ignores_case_and_prefers_latest() {
        let first = DictionaryEntry {
            word: "Paris".to_string(),
            origin: "old".to_string(),
            ..Default::default()
        };
        let second = DictionaryEntry {
            origin: "new".to_string(),
            ..first.clone()
        };
        let records = vec![
            WordEntry::resolved("Paris", "0.1", first),
            WordEntry::resolved("Paris", "0.2", second),
            WordEntry::failed("other", "0.2", "not an English word"),
        ];

        let found = find(&records, "paris");
        assert_eq!(found.entry.map(|e| e.origin.as_str()), Some("new"));
        assert!(found.error.is_none());
        assert!(find(&records, "nowhere").entry.is_none());
    }
}
