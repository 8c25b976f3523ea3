//! Local review server: the HTML report plus a taste-score endpoint.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use lexifree_core::AppendLog;
use lexifree_types::TasteScore;
use serde::Deserialize;

use crate::commands::eval::report_html;
use crate::state::AppState;

pub struct ReviewState {
    pub app: AppState,
    pub results_file: PathBuf,
    pub scores: AppendLog,
}

#[derive(Debug, Deserialize)]
pub struct ScoreUpdate {
    pub word: String,
    pub ai_defn: usize,
    pub score: i64,
}

pub async fn run(state: &AppState, results_file: PathBuf) -> anyhow::Result<()> {
    // Fail before listening if the report cannot be built at all.
    report_html(state, &results_file)?;

    let scores = AppendLog::open(&results_file).await?;
    let addr = state.config.eval.review_addr.clone();
    let review = Arc::new(ReviewState {
        app: AppState::new(state.config.clone()),
        results_file,
        scores,
    });

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("Go to http://{}/ to use the interface. Press ctrl-C when done.", addr);

    axum::serve(listener, routes().with_state(review))
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Shutdown requested");
        })
        .await?;
    Ok(())
}

pub fn routes() -> Router<Arc<ReviewState>> {
    Router::new()
        .route("/", get(page))
        .route("/score-update", post(score_update))
}

pub(crate) async fn page(State(review): State<Arc<ReviewState>>) -> Response {
    match report_html(&review.app, &review.results_file) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("failed to render report: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}")).into_response()
        }
    }
}

pub async fn score_update(
    State(review): State<Arc<ReviewState>>,
    Json(update): Json<ScoreUpdate>,
) -> StatusCode {
    let score = TasteScore {
        word: update.word,
        ai_defn: update.ai_defn,
        taste_score: update.score,
    };

    match review.scores.append(&score).await {
        Ok(()) => {
            tracing::info!(
                "taste score {} for ai{} of \"{}\"",
                score.taste_score,
                score.ai_defn + 1,
                score.word
            );
            StatusCode::NO_CONTENT
        }
        Err(e) => {
            tracing::error!("failed to save taste score: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
