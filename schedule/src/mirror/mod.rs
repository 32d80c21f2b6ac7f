//! Best-effort mirroring of study sessions to the remote backend.
//!
//! The store hands each new session to a [`MirrorHandle`]; a single worker
//! task submits them in order and reports every outcome on a broadcast
//! channel. Nothing here ever feeds back into local state.

mod worker;

use std::sync::Arc;

use study::LogId;
use study_client::{StudyBackend, StudySubmission};
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;

/// A study session waiting to be submitted.
#[derive(Debug, Clone)]
pub struct MirrorJob {
    pub log_id: LogId,
    pub submission: StudySubmission,
}

/// Outcome of one mirroring attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorEvent {
    Submitted { log_id: LogId },
    Failed { log_id: LogId, error: String },
    /// The worker was cancelled; `log_id` is the submission it abandoned.
    Cancelled { log_id: Option<LogId> },
}

/// Owns the mirror worker task.
pub struct MirrorHandle {
    job_tx: mpsc::UnboundedSender<MirrorJob>,
    event_tx: broadcast::Sender<MirrorEvent>,
    cancel_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl MirrorHandle {
    /// Spawn the worker on the current tokio runtime.
    pub fn spawn<B: StudyBackend + 'static>(backend: Arc<B>) -> Self {
        let (job_tx, job_rx) = mpsc::unbounded_channel();
        let (event_tx, _) = broadcast::channel(64);
        let (cancel_tx, cancel_rx) = watch::channel(false);

        let task = tokio::spawn(worker::run_mirror_worker(
            backend,
            job_rx,
            event_tx.clone(),
            cancel_rx,
        ));

        tracing::info!("Backend mirror initialized");

        Self {
            job_tx,
            event_tx,
            cancel_tx,
            task,
        }
    }

    /// Queue a submission. Never blocks; a closed worker is logged.
    pub fn submit(&self, job: MirrorJob) {
        let log_id = job.log_id;
        if self.job_tx.send(job).is_err() {
            tracing::warn!(%log_id, "Mirror worker gone, submission dropped");
            let _ = self.event_tx.send(MirrorEvent::Failed {
                log_id,
                error: "mirror worker is not running".to_string(),
            });
        }
    }

    /// Receive outcomes of submissions queued after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<MirrorEvent> {
        self.event_tx.subscribe()
    }

    /// Stop the worker, abandoning the in-flight and queued submissions.
    pub fn cancel(&self) {
        let _ = self.cancel_tx.send(true);
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Let the worker drain its queue, then wait for it to exit.
    pub async fn shutdown(self) {
        let Self {
            job_tx,
            cancel_tx,
            task,
            ..
        } = self;
        drop(job_tx);
        if let Err(e) = task.await {
            tracing::warn!("Mirror worker ended abnormally: {}", e);
        }
        drop(cancel_tx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use study::new_id;
    use study_client::MockBackend;

    fn job() -> MirrorJob {
        MirrorJob {
            log_id: new_id(),
            submission: StudySubmission::new("7", "History", "Cold War", 95, "medium"),
        }
    }

    #[tokio::test]
    async fn test_submission_reaches_backend() {
        let backend = Arc::new(MockBackend::accepting());
        let mirror = MirrorHandle::spawn(backend.clone());
        let mut events = mirror.subscribe();

        let job = job();
        mirror.submit(job.clone());

        assert_eq!(
            events.recv().await.unwrap(),
            MirrorEvent::Submitted { log_id: job.log_id }
        );
        assert_eq!(backend.submissions(), vec![job.submission]);
    }

    #[tokio::test]
    async fn test_backend_failure_is_reported_not_raised() {
        let backend = Arc::new(MockBackend::failing());
        let mirror = MirrorHandle::spawn(backend);
        let mut events = mirror.subscribe();

        let first = job();
        let second = job();
        mirror.submit(first.clone());
        mirror.submit(second.clone());

        assert!(matches!(
            events.recv().await.unwrap(),
            MirrorEvent::Failed { log_id, .. } if log_id == first.log_id
        ));
        // The worker keeps going after a failure
        assert!(matches!(
            events.recv().await.unwrap(),
            MirrorEvent::Failed { log_id, .. } if log_id == second.log_id
        ));
        assert!(mirror.is_running());
    }

    #[tokio::test]
    async fn test_cancel_abandons_in_flight_submission() {
        let backend = Arc::new(MockBackend::accepting().with_delay(Duration::from_secs(30)));
        let mirror = MirrorHandle::spawn(backend.clone());
        let mut events = mirror.subscribe();

        let job = job();
        mirror.submit(job.clone());
        tokio::time::sleep(Duration::from_millis(20)).await;
        mirror.cancel();

        assert_eq!(
            events.recv().await.unwrap(),
            MirrorEvent::Cancelled {
                log_id: Some(job.log_id)
            }
        );
        assert!(backend.submissions().is_empty());
    }

    #[tokio::test]
    async fn test_shutdown_drains_queue() {
        let backend = Arc::new(MockBackend::accepting());
        let mirror = MirrorHandle::spawn(backend.clone());
        mirror.submit(job());
        mirror.submit(job());
        mirror.shutdown().await;
        assert_eq!(backend.submissions().len(), 2);
    }
}
