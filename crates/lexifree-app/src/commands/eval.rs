use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use lexifree_eval::{
    DefinitionMatcher, EvalData, ResultsLog, build_report, load_data, render_html, run_auto_evals,
};

use crate::cli::{EvalAction, EvalArgs};
use crate::commands::{output, serve};
use crate::state::AppState;

pub async fn run(state: &AppState, args: EvalArgs) -> anyhow::Result<()> {
    match args.action {
        EvalAction::Run { test_file, out } => run_checks(state, &test_file, out.as_deref()).await,
        EvalAction::Html { results_file, out } => {
            let html = report_html(state, &results_file)?;
            let mut out = output(out.as_deref())?;
            out.write_all(html.as_bytes())?;
            out.flush()?;
            Ok(())
        }
        EvalAction::Serve { results_file } => serve::run(state, results_file).await,
    }
}

async fn run_checks(state: &AppState, test_file: &Path, out: Option<&Path>) -> anyhow::Result<()> {
    let data = load_eval_data(state, test_file)?;
    let matcher = Arc::new(DefinitionMatcher::new(state.completer()?, state.rates));

    let mut out = output(out)?;
    let run = run_auto_evals(matcher, &data, test_file, state.config.eval.workers, &mut *out).await?;
    out.flush()?;

    tracing::info!(
        "accuracy {:.2}%, coverage {:.2}%",
        run.accuracy.accuracy() * 100.0,
        run.coverage.accuracy() * 100.0
    );
    Ok(())
}

/// Rebuild the HTML report for a results log from the current files.
pub fn report_html(state: &AppState, results_file: &Path) -> anyhow::Result<String> {
    let results = ResultsLog::load(results_file)
        .with_context(|| format!("loading results {}", results_file.display()))?;
    let data = load_eval_data(state, &results.test_file)?;
    let report = build_report(&results, &data)?;
    tracing::info!(
        "{} words, accuracy {:.2}%, coverage {:.2}%, version {}",
        report.cards.len(),
        report.accuracy * 100.0,
        report.coverage * 100.0,
        report.version
    );
    Ok(render_html(&report))
}

fn load_eval_data(state: &AppState, test_file: &Path) -> anyhow::Result<EvalData> {
    let data = load_data(&state.entries_path(), test_file, state.config.eval.max_words)?;
    Ok(data)
}
