use std::sync::Arc;

use study_client::StudyBackend;
use tokio::sync::{broadcast, mpsc, watch};

use super::{MirrorEvent, MirrorJob};

/// A long-lived worker task. Receives submissions from the channel and
/// sends them to the backend one at a time.
pub(super) async fn run_mirror_worker<B: StudyBackend + 'static>(
    backend: Arc<B>,
    mut job_rx: mpsc::UnboundedReceiver<MirrorJob>,
    event_tx: broadcast::Sender<MirrorEvent>,
    mut cancel_rx: watch::Receiver<bool>,
) {
    tracing::info!("Mirror worker started");

    loop {
        let job = tokio::select! {
            biased;

            _ = cancel_rx.changed() => {
                tracing::info!("Mirror worker cancelled while idle");
                let _ = event_tx.send(MirrorEvent::Cancelled { log_id: None });
                break;
            }

            job = job_rx.recv() => match job {
                Some(job) => job,
                None => {
                    tracing::info!("Mirror queue closed, worker exiting");
                    break;
                }
            },
        };

        tracing::debug!(log_id = %job.log_id, "Submitting study to backend");

        tokio::select! {
            biased;

            _ = cancel_rx.changed() => {
                tracing::info!(log_id = %job.log_id, "Mirror worker cancelled mid-submission");
                let _ = event_tx.send(MirrorEvent::Cancelled { log_id: Some(job.log_id) });
                break;
            }

            result = backend.submit_study(&job.submission) => {
                let event = match result {
                    Ok(()) => {
                        tracing::info!(log_id = %job.log_id, "Study mirrored to backend");
                        MirrorEvent::Submitted { log_id: job.log_id }
                    }
                    Err(e) => {
                        tracing::error!(log_id = %job.log_id, "Backend submission failed: {}", e);
                        MirrorEvent::Failed { log_id: job.log_id, error: e.to_string() }
                    }
                };
                let _ = event_tx.send(event);
            }
        }
    }
}
