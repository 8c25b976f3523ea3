pub mod cost;
pub mod error;
pub mod jsonl;
pub mod preprocess;
pub mod prompt;
pub mod reply;
pub mod similarity;

pub use cost::{CostAccumulator, RateTable};
pub use error::{LogError, ReplyError};
pub use jsonl::AppendLog;
pub use similarity::are_texts_similar;
