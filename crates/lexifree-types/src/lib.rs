pub mod entry;
pub mod evaluation;
pub mod events;

pub use entry::{DefinitionItem, DictionaryEntry, Outcome, ReferenceRecord, Usage, WordEntry};
pub use evaluation::{
    MatchResult, MatchValue, NeedleKind, ResultsLine, TasteScore, TestBody, TestRecord,
};
pub use events::{BatchEvent, Resolution};
