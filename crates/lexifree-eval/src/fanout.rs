//! Concurrent checking of every (word, definition) pair.
//!
//! The same routine measures accuracy (AI definitions against the
//! reference) and coverage (reference against AI definitions); only the
//! [`NeedleKind`] written into each record differs.

use std::sync::Arc;

use lexifree_types::{MatchResult, MatchValue, NeedleKind};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::EvalError;
use crate::matcher::{DefinitionMatcher, Verdict};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MatchSummary {
    pub total: usize,
    pub misses: usize,
    /// Misses forced by unusable matcher replies. Also counted in `misses`.
    pub irregular: usize,
}

impl MatchSummary {
    /// Share of needles that matched something, 0.0 when there were none.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.total - self.misses) as f64 / self.total as f64
    }
}

/// Check every needle of every word against that word's haystack.
///
/// `words`, `needles` and `haystacks` run in parallel. Each result is
/// handed to `emit` as soon as it completes, so records come out in
/// completion order.
pub async fn find_defn_matches<F>(
    matcher: Arc<DefinitionMatcher>,
    words: &[String],
    needles: &[Vec<String>],
    kind: NeedleKind,
    haystacks: &[Vec<String>],
    workers: usize,
    mut emit: F,
) -> Result<MatchSummary, EvalError>
where
    F: FnMut(&MatchResult) -> std::io::Result<()>,
{
    let permits = Arc::new(Semaphore::new(workers.max(1)));
    let mut tasks = JoinSet::new();
    let mut summary = MatchSummary::default();

    for ((word, checks), given) in words.iter().zip(needles).zip(haystacks) {
        let given = Arc::new(given.clone());
        for (index, candidate) in checks.iter().enumerate() {
            summary.total += 1;

            let matcher = matcher.clone();
            let permits = permits.clone();
            let given = given.clone();
            let word = word.clone();
            let candidate = candidate.clone();

            tasks.spawn(async move {
                let _permit = permits.acquire_owned().await;
                let verdict = matcher.is_defn_good(&candidate, &given).await;
                to_result(word, kind, index, verdict)
            });
        }
    }

    tracing::info!("checking {} {} definitions", summary.total, kind.key());

    let mut done = 0;
    while let Some(joined) = tasks.join_next().await {
        done += 1;
        let result = match joined {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("definition check task failed: {}", e);
                summary.misses += 1;
                summary.irregular += 1;
                continue;
            }
        };

        if !result.matched.is_match() {
            summary.misses += 1;
        }
        if result.irregular {
            summary.irregular += 1;
        }

        tracing::debug!("[{}/{}] {}", done, summary.total, result.word);
        emit(&result)?;
    }

    Ok(summary)
}

fn to_result(word: String, kind: NeedleKind, index: usize, verdict: Verdict) -> MatchResult {
    let (matched, irregular) = match verdict {
        Verdict::Match(i) => (MatchValue::Index(i), false),
        Verdict::NoMatch => (MatchValue::NoMatch, false),
        Verdict::Irregular(reply) => {
            tracing::warn!(
                "Error: bad matcher reply {:?} for {} {} of \"{}\"; marking as no-match",
                reply,
                kind.key(),
                index,
                word
            );
            (MatchValue::NoMatch, true)
        }
    };

    MatchResult {
        word,
        kind,
        index,
        matched,
        irregular,
    }
}
