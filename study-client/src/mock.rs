//! Mock StudyBackend implementation for testing

use crate::error::{ClientError, ClientResult};
use crate::traits::{StudyBackend, StudySubmission};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

type SubmitResponse = Box<dyn Fn() -> ClientResult<()> + Send + Sync>;

/// Mock backend - only compiled in test mode or with mock feature
#[derive(Clone)]
pub struct MockBackend {
    submit_response: Arc<Mutex<Option<SubmitResponse>>>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
    delay: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    SubmitStudy(StudySubmission),
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            submit_response: Arc::new(Mutex::new(None)),
            call_log: Arc::new(Mutex::new(Vec::new())),
            delay: None,
        }
    }

    /// Backend that accepts every submission.
    pub fn accepting() -> Self {
        Self::new().with_submit_response(|| Ok(()))
    }

    /// Backend that rejects every submission with a 503.
    pub fn failing() -> Self {
        Self::new().with_submit_response(|| {
            Err(ClientError::Status {
                status: 503,
                body: "service unavailable".to_string(),
            })
        })
    }

    /// Configure submit_study response
    pub fn with_submit_response<F>(self, f: F) -> Self
    where
        F: Fn() -> ClientResult<()> + Send + Sync + 'static,
    {
        *self.submit_response.lock().unwrap() = Some(Box::new(f));
        self
    }

    /// Sleep before answering, to keep calls in flight.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Get the call log for verification
    pub fn calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// Submissions received so far
    pub fn submissions(&self) -> Vec<StudySubmission> {
        self.calls()
            .into_iter()
            .map(|MockCall::SubmitStudy(s)| s)
            .collect()
    }
}

#[async_trait]
impl StudyBackend for MockBackend {
    async fn submit_study(&self, submission: &StudySubmission) -> ClientResult<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.call_log
            .lock()
            .unwrap()
            .push(MockCall::SubmitStudy(submission.clone()));

        let responses = self.submit_response.lock().unwrap();
        match responses.as_ref() {
            Some(f) => f(),
            None => Err(ClientError::NotConfigured("submit_study".to_string())),
        }
    }
}
