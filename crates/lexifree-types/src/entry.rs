use serde::{Deserialize, Deserializer, Serialize};

/// One line of the entry log. Records are never edited in place; a rebuild
/// appends a new line for the same word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    pub version: String,
    #[serde(default)]
    pub cost: f64,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl WordEntry {
    pub fn failed(word: &str, version: &str, error: impl Into<String>) -> Self {
        Self {
            word: word.to_string(),
            version: version.to_string(),
            cost: 0.0,
            outcome: Outcome::Failed {
                error: error.into(),
                entry: None,
            },
        }
    }

    pub fn redirect(word: &str, version: &str, base_word: &str) -> Self {
        Self {
            word: word.to_string(),
            version: version.to_string(),
            cost: 0.0,
            outcome: Outcome::Redirect {
                base_word: base_word.to_string(),
            },
        }
    }

    pub fn resolved(word: &str, version: &str, entry: DictionaryEntry) -> Self {
        Self {
            word: word.to_string(),
            version: version.to_string(),
            cost: 0.0,
            outcome: Outcome::Entry { entry },
        }
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }

    /// The dictionary entry, only when the build fully succeeded.
    pub fn entry(&self) -> Option<&DictionaryEntry> {
        match &self.outcome {
            Outcome::Entry { entry } => Some(entry),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn base_word(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Redirect { base_word } => Some(base_word),
            _ => None,
        }
    }
}

/// Exactly one of `error`, `base_word` or `entry` is present on a record.
///
/// A failed record may still carry the base entry when only the poetic stage
/// went wrong; consumers treat it as failed all the same.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Outcome {
    Failed {
        error: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        entry: Option<DictionaryEntry>,
    },
    Redirect {
        base_word: String,
    },
    Entry {
        entry: DictionaryEntry,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub word: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pronunciation: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub definitions: Vec<DefinitionItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub origin: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub synonyms: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub antonyms: Vec<String>,
}

impl DictionaryEntry {
    /// Fill in the headword when the model left it out and wrap the
    /// pronunciation in slashes.
    pub fn normalize(&mut self, requested_word: &str) {
        if self.word.trim().is_empty() {
            self.word = requested_word.to_string();
        }

        let pronunciation = self.pronunciation.trim();
        if !pronunciation.is_empty()
            && !(pronunciation.len() > 1
                && pronunciation.starts_with('/')
                && pronunciation.ends_with('/'))
        {
            self.pronunciation = format!("/{}/", pronunciation.trim_matches('/'));
        }
    }

    pub fn definition_texts(&self) -> Vec<String> {
        self.definitions
            .iter()
            .map(|d| d.definition.clone())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefinitionItem {
    #[serde(
        default,
        alias = "part of speech",
        alias = "partOfSpeech",
        deserialize_with = "null_as_default"
    )]
    pub part_of_speech: String,
    pub definition: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub example: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poetic_definition: Option<String>,
}

/// Models often answer `null` for fields they have nothing for.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A line of the reference cache log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    pub word: String,
    pub definitions: Vec<String>,
}

/// Token counts reported for one completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_fields_read_as_empty() {
        let entry: DictionaryEntry = serde_json::from_str(
            r#"{"word": "the", "pronunciation": null, "origin": null, "synonyms": null,
                "antonyms": null, "definitions": [
                    {"part_of_speech": null, "definition": "the definite article", "example": null}
                ]}"#,
        )
        .unwrap();

        assert!(entry.antonyms.is_empty());
        assert!(entry.synonyms.is_empty());
        assert_eq!(entry.origin, "");
        assert_eq!(entry.definitions[0].part_of_speech, "");
        assert_eq!(entry.definitions[0].example, "");
    }

    #[test]
    fn test_entry_record_roundtrips_through_json_line() {
        let line = r#"{"word":"cats","version":"1.0","entry":{"word":"cats","definitions":[{"definition":"a small domesticated feline"}]}}"#;
        let record: WordEntry = serde_json::from_str(line).unwrap();

        assert_eq!(record.word, "cats");
        assert_eq!(record.cost, 0.0);
        let entry = record.entry().expect("entry outcome");
        assert_eq!(entry.definitions[0].definition, "a small domesticated feline");
        assert!(entry.definitions[0].poetic_definition.is_none());
    }

    #[test]
    fn test_error_and_redirect_records_parse() {
        let failed: WordEntry =
            serde_json::from_str(r#"{"word":"xq","version":"0.2","error":"not an English word","cost":0.001}"#)
                .unwrap();
        assert_eq!(failed.error(), Some("not an English word"));
        assert!(failed.entry().is_none());

        let redirect: WordEntry =
            serde_json::from_str(r#"{"word":"running","version":"0.2","base_word":"run","cost":0.0}"#)
                .unwrap();
        assert_eq!(redirect.base_word(), Some("run"));
    }

    #[test]
    fn test_poetic_failure_keeps_base_entry_but_counts_as_error() {
        let mut record = WordEntry::failed("cat", "0.2", "Poetic definitions were not a list object");
        if let Outcome::Failed { entry, .. } = &mut record.outcome {
            *entry = Some(DictionaryEntry::default());
        }
        let line = serde_json::to_string(&record).unwrap();
        let back: WordEntry = serde_json::from_str(&line).unwrap();

        assert!(back.entry().is_none());
        assert_eq!(back.error(), Some("Poetic definitions were not a list object"));
        assert!(line.contains("\"entry\""));
    }

    #[test]
    fn test_part_of_speech_accepts_spaced_key() {
        let item: DefinitionItem = serde_json::from_str(
            r#"{"part of speech":"noun","definition":"a feline","example":"The cat sat."}"#,
        )
        .unwrap();
        assert_eq!(item.part_of_speech, "noun");
        assert!(serde_json::to_string(&item).unwrap().contains("part_of_speech"));
    }

    #[test]
    fn test_pronunciation_is_wrapped_in_slashes() {
        let mut entry = DictionaryEntry {
            pronunciation: "kæt".to_string(),
            ..Default::default()
        };
        entry.normalize("cat");
        assert_eq!(entry.pronunciation, "/kæt/");
        assert_eq!(entry.word, "cat");

        entry.normalize("cat");
        assert_eq!(entry.pronunciation, "/kæt/");
    }
}
