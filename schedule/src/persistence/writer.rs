use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{mpsc, oneshot};

use super::{CollectionKey, KeyValueStore, PersistenceError};

enum WriteJob {
    Save { key: CollectionKey, value: Value },
    Remove { key: CollectionKey },
    Flush(oneshot::Sender<()>),
}

/// Handle to the background task that mirrors collections to the store.
///
/// Jobs are applied one at a time in the order they were enqueued, so the
/// last snapshot of a collection is always the one that lands. Enqueueing
/// never blocks and failures are logged by the task, not returned.
#[derive(Clone)]
pub struct PersistenceWriter {
    job_tx: mpsc::UnboundedSender<WriteJob>,
}

impl PersistenceWriter {
    /// Spawn the writer task on the current tokio runtime.
    pub fn spawn<K: KeyValueStore>(store: Arc<K>) -> Self {
        let (job_tx, job_rx) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(store, job_rx));
        Self { job_tx }
    }

    /// Queue a full snapshot of a collection.
    pub fn save(&self, key: CollectionKey, value: Value) {
        if self.job_tx.send(WriteJob::Save { key, value }).is_err() {
            tracing::warn!(%key, "Persistence writer closed, snapshot dropped");
        }
    }

    /// Queue deletion of a collection.
    pub fn remove(&self, key: CollectionKey) {
        if self.job_tx.send(WriteJob::Remove { key }).is_err() {
            tracing::warn!(%key, "Persistence writer closed, removal dropped");
        }
    }

    /// Wait until every job queued before this call has been applied.
    pub async fn flush(&self) -> Result<(), PersistenceError> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.job_tx
            .send(WriteJob::Flush(ack_tx))
            .map_err(|_| PersistenceError::WriterClosed)?;
        ack_rx.await.map_err(|_| PersistenceError::WriterClosed)
    }
}

async fn run_writer<K: KeyValueStore>(store: Arc<K>, mut job_rx: mpsc::UnboundedReceiver<WriteJob>) {
    tracing::debug!("Persistence writer started");

    while let Some(job) = job_rx.recv().await {
        match job {
            WriteJob::Save { key, value } => {
                if let Err(e) = store.set(key.as_str(), &value).await {
                    tracing::warn!(%key, "Failed to persist collection: {}", e);
                } else {
                    tracing::trace!(%key, "Collection persisted");
                }
            }
            WriteJob::Remove { key } => {
                if let Err(e) = store.remove(key.as_str()).await {
                    tracing::warn!(%key, "Failed to remove collection: {}", e);
                }
            }
            WriteJob::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }

    tracing::debug!("Persistence writer exiting");
}
