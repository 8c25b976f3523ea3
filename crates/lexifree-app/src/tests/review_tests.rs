//! Review server handlers, called directly without binding a socket.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use lexifree_config::Config;
use lexifree_core::AppendLog;
use lexifree_core::jsonl::{read_records, to_line};
use lexifree_types::{DefinitionItem, DictionaryEntry, ResultsLine, TasteScore, WordEntry};
use tempfile::TempDir;

use crate::commands::serve::{ReviewState, ScoreUpdate, page, score_update};
use crate::state::AppState;

async fn review_state(dir: &TempDir) -> Arc<ReviewState> {
    let entries = dir.path().join("entries.json");
    let test_file = dir.path().join("test.json");
    let results = dir.path().join("results.json");

    let entry = DictionaryEntry {
        word: "cats".to_string(),
        definitions: vec![DefinitionItem {
            part_of_speech: "noun".to_string(),
            definition: "small furry pets".to_string(),
            poetic_definition: Some("Furry knaves of pomp and flounce.".to_string()),
            ..Default::default()
        }],
        ..Default::default()
    };
    std::fs::write(
        &entries,
        to_line(&WordEntry::resolved("cats", "0.2", entry)).unwrap(),
    )
    .unwrap();
    std::fs::write(
        &test_file,
        "{\"word\": \"cats\", \"wiktionary_definitions\": [\"Noun Plural of cat.\"]}\n",
    )
    .unwrap();
    std::fs::write(
        &results,
        format!(
            "{{\"test_file\": \"{}\"}}\n{{\"word\": \"cats\", \"ai_defn\": 0, \"match\": 0}}\n{{\"word\": \"cats\", \"wiki_defn\": 0, \"match\": false}}\n",
            test_file.display()
        ),
    )
    .unwrap();

    let mut config = Config::default();
    config.storage.entries_path = entries.display().to_string();

    Arc::new(ReviewState {
        app: AppState::new(config),
        scores: AppendLog::open(&results).await.unwrap(),
        results_file: results,
    })
}

#[tokio::test]
async fn test_page_renders_current_results() {
    let dir = tempfile::tempdir().unwrap();
    let review = review_state(&dir).await;

    let response = page(State(review)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("Furry knaves of pomp and flounce."));
    assert!(html.contains("score-update"));
}

#[tokio::test]
async fn test_missing_entries_is_a_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let review = review_state(&dir).await;
    std::fs::remove_file(dir.path().join("entries.json")).unwrap();

    let response = page(State(review)).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_score_update_is_appended() {
    let dir = tempfile::tempdir().unwrap();
    let review = review_state(&dir).await;

    let status = score_update(
        State(review.clone()),
        Json(ScoreUpdate {
            word: "cats".to_string(),
            ai_defn: 0,
            score: 1,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let lines: Vec<ResultsLine> = read_records(&review.results_file).unwrap();
    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[3],
        ResultsLine::Taste(TasteScore {
            word: "cats".to_string(),
            ai_defn: 0,
            taste_score: 1,
        })
    );
}
