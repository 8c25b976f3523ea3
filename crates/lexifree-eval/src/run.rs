use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use lexifree_core::jsonl::to_line;
use lexifree_types::{NeedleKind, ResultsLine};

use crate::data::EvalData;
use crate::fanout::{MatchSummary, find_defn_matches};
use crate::matcher::DefinitionMatcher;
use crate::EvalError;

#[derive(Debug, Clone, Copy)]
pub struct EvalRun {
    pub accuracy: MatchSummary,
    pub coverage: MatchSummary,
}

/// Write a results log to `out`: the test file line, then one record per
/// AI definition (accuracy) and one per reference definition (coverage).
pub async fn run_auto_evals(
    matcher: Arc<DefinitionMatcher>,
    data: &EvalData,
    test_file: &Path,
    workers: usize,
    out: &mut dyn Write,
) -> Result<EvalRun, EvalError> {
    let header = ResultsLine::Header {
        test_file: test_file.display().to_string(),
    };
    out.write_all(to_line(&header)?.as_bytes())?;

    let words = data.words();
    let ai_defns: Vec<Vec<String>> = words.iter().map(|w| data.ai_definitions(w)).collect();
    let wiki_defns: Vec<Vec<String>> = words
        .iter()
        .map(|w| data.reference_definitions(w).map(<[String]>::to_vec).unwrap_or_default())
        .collect();

    let mut emit = |result: &lexifree_types::MatchResult| -> std::io::Result<()> {
        let line = to_line(result).map_err(std::io::Error::other)?;
        out.write_all(line.as_bytes())
    };

    let accuracy = find_defn_matches(
        matcher.clone(),
        &words,
        &ai_defns,
        NeedleKind::AiDefn,
        &wiki_defns,
        workers,
        &mut emit,
    )
    .await?;
    tracing::info!("AI defn accuracy: {:.2}%", accuracy.accuracy() * 100.0);

    let coverage = find_defn_matches(
        matcher.clone(),
        &words,
        &wiki_defns,
        NeedleKind::WikiDefn,
        &ai_defns,
        workers,
        &mut emit,
    )
    .await?;
    tracing::info!("AI defn coverage: {:.2}%", coverage.accuracy() * 100.0);

    let irregular = accuracy.irregular + coverage.irregular;
    if irregular > 0 {
        tracing::warn!("{} checks had unusable matcher replies and count as no-match", irregular);
    }
    tracing::info!("matcher cost: ${:.4}", matcher.spent());

    Ok(EvalRun { accuracy, coverage })
}
