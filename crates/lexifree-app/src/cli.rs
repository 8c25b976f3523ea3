use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "lexifree",
    version,
    about = "Build and evaluate an AI-written English dictionary"
)]
pub struct Cli {
    /// JSON file overriding any part of the environment config
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build dictionary entries and append them to the entry log
    Build(BuildArgs),
    /// Score entries against Wiktionary definitions
    Eval(EvalArgs),
    /// Sample test words from the unigram list
    MakeTest(MakeTestArgs),
    /// Money spent so far on entries
    Cost(CostArgs),
    /// Pretty-print what is recorded for one word
    Show(ShowArgs),
    /// Rewrite every version tag in the entry log
    Reversion(ReversionArgs),
}

#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    #[command(subcommand)]
    pub source: WordSource,

    /// Skip words that already have a record in the entry log
    #[arg(long, global = true, default_value_t = false)]
    pub keep: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum WordSource {
    /// Words [START, END) of the unigram frequency list
    Range { start: usize, end: usize },
    /// A .txt list (one word per line) or a .json list (one {"word"} per line)
    File { path: PathBuf },
    /// A single word
    Word { word: String },
}

#[derive(Args, Debug, Clone)]
pub struct EvalArgs {
    #[command(subcommand)]
    pub action: EvalAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum EvalAction {
    /// Run the automatic checks and write a results log
    Run {
        test_file: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Render a results log as a static HTML page
    Html {
        results_file: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Serve the report and record taste scores
    Serve { results_file: PathBuf },
}

#[derive(Args, Debug, Clone)]
pub struct MakeTestArgs {
    pub count: usize,

    /// Emit {word, wiktionary_definitions} records instead of bare words
    #[arg(long, short = 'w', default_value_t = false)]
    pub wiktionary: bool,

    #[arg(long, short = 's')]
    pub seed: Option<u64>,

    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct CostArgs {
    /// Only count records added since the last `cost` run
    #[arg(long, default_value_t = false)]
    pub latest: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    #[arg(required = true, num_args = 1..)]
    pub word: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ReversionArgs {
    pub version: String,
}
