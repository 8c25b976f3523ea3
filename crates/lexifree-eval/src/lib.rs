pub mod data;
pub mod fanout;
pub mod matcher;
pub mod report;
pub mod results;
pub mod run;

pub use data::{AiEntry, EvalData, load_data};
pub use fanout::{MatchSummary, find_defn_matches};
pub use matcher::{DefinitionMatcher, Verdict};
pub use report::{Report, WordCard, build_report, red_to_green, render_html};
pub use results::ResultsLog;
pub use run::{EvalRun, run_auto_evals};

use std::path::PathBuf;

use lexifree_core::LogError;

#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    #[error(transparent)]
    Log(#[from] LogError),

    #[error("No word of {test_file} has an AI entry; build entries for the test words first")]
    NoOverlap { test_file: PathBuf },

    #[error("Results log {path} does not start with a test_file line")]
    MissingHeader { path: PathBuf },

    #[error("\"{0}\" is in the results but has no AI entry or test definitions")]
    UnknownWord(String),

    #[error("Failed to write results: {0}")]
    Output(#[from] std::io::Error),
}
