use crate::entry::WordEntry;

/// How a build attempt for one requested word ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// A full entry was written for this (possibly canonical) word.
    Resolved(String),
    /// A terminal error record was written for this word.
    Failed { word: String, reason: String },
    /// The redirect chain came back to a word it had already visited.
    Cycle(String),
}

impl Resolution {
    pub fn word(&self) -> &str {
        match self {
            Resolution::Resolved(word) => word,
            Resolution::Failed { word, .. } => word,
            Resolution::Cycle(word) => word,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }
}

/// Messages drained by the single log writer during a batch run.
#[derive(Debug, Clone)]
pub enum BatchEvent {
    Record(WordEntry),
    WordDone { word: String, resolution: Resolution },
}
