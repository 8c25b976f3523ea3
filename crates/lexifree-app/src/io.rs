use anyhow::Context;
use kanal::AsyncReceiver;
use lexifree_core::AppendLog;
use lexifree_types::{BatchEvent, Resolution};

use crate::status::BatchStatus;

/// The only writer of the entry log during a batch run.
///
/// Drains events until every sender is gone, then hands back the final
/// status.
pub async fn log_writer(
    log: AppendLog,
    events: AsyncReceiver<BatchEvent>,
    mut status: BatchStatus,
) -> anyhow::Result<BatchStatus> {
    while let Ok(event) = events.recv().await {
        match event {
            BatchEvent::Record(record) => {
                log.append(&record)
                    .await
                    .with_context(|| format!("writing record for \"{}\"", record.word))?;
                status.record_written(&record);
            }
            BatchEvent::WordDone { word, resolution } => {
                status.word_done(&word, &resolution);
                let outcome = match &resolution {
                    Resolution::Resolved(canonical) if *canonical == word => "entry".to_string(),
                    Resolution::Resolved(canonical) => format!("entry for {canonical}"),
                    Resolution::Failed { reason, .. } => format!("error: {reason}"),
                    Resolution::Cycle(at) => format!("cycle at {at}"),
                };
                tracing::info!(
                    "[{}/{}] {:<20} {} (${:.4} so far)",
                    status.done,
                    status.total,
                    word,
                    outcome,
                    status.cost
                );
            }
        }
    }

    Ok(status)
}
