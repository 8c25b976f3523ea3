use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::error::LogError;

/// Serialize one record as a single newline-terminated line.
pub fn to_line<T: Serialize>(record: &T) -> Result<String, LogError> {
    let mut line = serde_json::to_string(record)?;
    line.push('\n');
    Ok(line)
}

/// Read every record of a JSON-lines file. Blank lines are skipped.
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, LogError> {
    let file = fs::File::open(path).map_err(|source| LogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut records = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|source| LogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let record = serde_json::from_str(&line).map_err(|source| LogError::Parse {
            path: path.to_path_buf(),
            line: idx + 1,
            source,
        })?;
        records.push(record);
    }

    Ok(records)
}

/// Like [`read_records`], but a missing file reads as empty.
pub fn read_records_if_exists<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, LogError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    read_records(path)
}

/// Replace the whole file with `records`.
///
/// The new content is written to a sibling temp file and renamed over the
/// old one, so readers never see a half-written log.
pub fn rewrite_records<T: Serialize>(path: &Path, records: &[T]) -> Result<(), LogError> {
    let io_err = |source| LogError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
    for record in records {
        tmp.write_all(to_line(record)?.as_bytes()).map_err(io_err)?;
    }
    tmp.flush().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;

    Ok(())
}

/// Shared handle to an append-only JSON-lines file.
///
/// Each record goes out in one write under the lock, so concurrent callers
/// never interleave partial lines.
pub struct AppendLog {
    path: PathBuf,
    file: Mutex<tokio::fs::File>,
}

impl AppendLog {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, LogError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|source| LogError::Io {
                path: path.clone(),
                source,
            })?;

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn append<T: Serialize>(&self, record: &T) -> Result<(), LogError> {
        let line = to_line(record)?;

        let mut file = self.file.lock().await;
        file.write_all(line.as_bytes())
            .await
            .map_err(|source| LogError::Io {
                path: self.path.clone(),
                source,
            })?;
        file.flush().await.map_err(|source| LogError::Io {
            path: self.path.clone(),
            source,
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use lexifree_types::ReferenceRecord;

    use super::*;

    fn record(word: &str) -> ReferenceRecord {
        ReferenceRecord {
            word: word.to_string(),
            definitions: vec![format!("definition of {word}")],
        }
    }

    #[tokio::test]
    async fn test_concurrent_appends_keep_whole_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.json");
        let log = Arc::new(AppendLog::open(&path).await.unwrap());

        let mut handles = Vec::new();
        for i in 0..50 {
            let log = log.clone();
            handles.push(tokio::spawn(async move {
                log.append(&record(&format!("w{i}"))).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let records: Vec<ReferenceRecord> = read_records(&path).unwrap();
        assert_eq!(records.len(), 50);
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let records: Vec<ReferenceRecord> =
            read_records_if_exists(&dir.path().join("nope.json")).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_error_names_the_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{\"word\":\"a\",\"definitions\":[]}\n\nnot json\n").unwrap();

        match read_records::<ReferenceRecord>(&path) {
            Err(LogError::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected parse error, got {:?}", other.map(|r| r.len())),
        }
    }

    #[test]
    fn test_rewrite_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.json");
        fs::write(&path, to_line(&record("old")).unwrap()).unwrap();

        rewrite_records(&path, &[record("a"), record("b")]).unwrap();

        let records: Vec<ReferenceRecord> = read_records(&path).unwrap();
        assert_eq!(records, vec![record("a"), record("b")]);
    }
}
