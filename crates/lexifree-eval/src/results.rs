use std::path::{Path, PathBuf};

use lexifree_core::jsonl::read_records;
use lexifree_types::{MatchResult, ResultsLine, TasteScore};

use crate::EvalError;

/// A parsed results log: the test file it was run against, the matcher
/// records, and any human taste scores appended since.
#[derive(Debug, Clone)]
pub struct ResultsLog {
    pub test_file: PathBuf,
    pub matches: Vec<MatchResult>,
    pub tastes: Vec<TasteScore>,
}

impl ResultsLog {
    pub fn load(path: &Path) -> Result<Self, EvalError> {
        let mut lines = read_records::<ResultsLine>(path)?.into_iter();

        let Some(ResultsLine::Header { test_file }) = lines.next() else {
            return Err(EvalError::MissingHeader {
                path: path.to_path_buf(),
            });
        };

        let mut log = ResultsLog {
            test_file: PathBuf::from(test_file),
            matches: Vec::new(),
            tastes: Vec::new(),
        };

        for line in lines {
            match line {
                ResultsLine::Match(result) => log.matches.push(result),
                ResultsLine::Taste(score) => log.tastes.push(score),
                ResultsLine::Header { test_file } => {
                    tracing::warn!("ignoring extra test_file line ({}) in {}", test_file, path.display())
                }
            }
        }

        Ok(log)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_interleaved_lines_are_sorted_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        fs::write(
            &path,
            [
                r#"{"test_file":"test_10.json"}"#,
                r#"{"word":"cat","ai_defn":0,"match":0}"#,
                r#"{"word":"cat","ai_defn":0,"taste_score":5}"#,
                r#"{"word":"cat","wiki_defn":0,"match":false,"irregular":true}"#,
            ]
            .join("\n"),
        )
        .unwrap();

        let log = ResultsLog::load(&path).unwrap();
        assert_eq!(log.test_file, PathBuf::from("test_10.json"));
        assert_eq!(log.matches.len(), 2);
        assert!(log.matches[1].irregular);
        assert_eq!(log.tastes[0].taste_score, 5);
    }

    #[test]
    fn test_header_is_required() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        fs::write(&path, r#"{"word":"cat","ai_defn":0,"match":0}"#).unwrap();

        assert!(matches!(
            ResultsLog::load(&path),
            Err(EvalError::MissingHeader { .. })
        ));
    }
}
