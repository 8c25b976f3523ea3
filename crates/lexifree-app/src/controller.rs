use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lexifree_config::batch::BatchConfig;
use lexifree_core::AppendLog;
use lexifree_lang_english::EntryBuilder;
use lexifree_types::BatchEvent;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use crate::io::log_writer;
use crate::status::BatchStatus;

/// Centralized channel management
pub struct ChannelSet {
    pub events: (AsyncSender<BatchEvent>, AsyncReceiver<BatchEvent>),
}

impl ChannelSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: kanal::bounded_async(capacity),
        }
    }
}

/// Runs the entry builder over a word list with bounded concurrency.
pub struct BatchController {
    channels: ChannelSet,
    builder: Arc<EntryBuilder>,
    workers: usize,
    cancel_token: CancellationToken,
}

impl BatchController {
    pub fn new(builder: Arc<EntryBuilder>, config: &BatchConfig) -> Self {
        Self {
            channels: ChannelSet::new(config.channel_capacity.max(1)),
            builder,
            workers: config.workers.max(1),
            cancel_token: CancellationToken::new(),
        }
    }

    /// Cancelling stops new words from starting. Words in flight finish and
    /// their records are written.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    pub async fn run(self, words: Vec<String>, log: AppendLog) -> anyhow::Result<BatchStatus> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("batch", %run_id);
        self.run_words(words, log).instrument(span).await
    }

    async fn run_words(self, words: Vec<String>, log: AppendLog) -> anyhow::Result<BatchStatus> {
        let (event_tx, event_rx) = self.channels.events;
        tracing::info!(
            "Building {} words with {} workers into {}",
            words.len(),
            self.workers,
            log.path().display()
        );

        let writer = tokio::spawn(
            log_writer(log, event_rx, BatchStatus::new(words.len())).in_current_span(),
        );

        let permits = Arc::new(Semaphore::new(self.workers));
        let mut tasks = JoinSet::new();

        for word in words {
            let permit = tokio::select! {
                biased;
                _ = self.cancel_token.cancelled() => {
                    tracing::warn!("Shutdown requested, not starting new words");
                    break;
                }
                permit = permits.clone().acquire_owned() => permit?,
            };

            let builder = self.builder.clone();
            let tx = event_tx.clone();
            tasks.spawn(
                async move {
                    let _permit = permit;
                    let outcome = builder.build_entry(&word).await;
                    for record in outcome.records {
                        tx.send(BatchEvent::Record(record)).await?;
                    }
                    tx.send(BatchEvent::WordDone {
                        word,
                        resolution: outcome.resolution,
                    })
                    .await
                }
                .in_current_span(),
            );
        }

        drop(event_tx);

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(())) => {}
                Ok(Err(e)) => tracing::error!("log writer stopped before a word was recorded: {}", e),
                Err(e) => tracing::error!("build task panicked: {}", e),
            }
        }

        let status = writer.await??;
        tracing::info!(
            "Batch done: {} entries, {} errors, {} cycles, {} records, ${:.4}",
            status.resolved,
            status.failed,
            status.cycles,
            status.records,
            status.cost
        );
        Ok(status)
    }
}
