//! HTTP implementation of the study backend

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Response, Url};
use serde_json::Value;

use crate::error::{ClientError, ClientResult};
use crate::traits::{ActorId, StudyBackend, StudySubmission};

// Query parameter names are fixed by the backend API.
const PARAM_USER_ID: &str = "user_id";
const PARAM_SUBJECT: &str = "disciplina";
const PARAM_TOPIC: &str = "conteudo";
const PARAM_HOURS: &str = "horas";
const PARAM_MINUTES: &str = "minutos";
const PARAM_DIFFICULTY: &str = "dificuldade";
const PARAM_PASSWORD: &str = "senha";

/// Network client for the remote study backend
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    /// Create a client for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let mut normalized = base_url.trim().to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let base_url =
            Url::parse(&normalized).map_err(|e| ClientError::InvalidAddress(e.to_string()))?;

        let client = Client::builder()
            .timeout(timeout)
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::ACCEPT,
                    reqwest::header::HeaderValue::from_static("application/json"),
                );
                headers
            })
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidAddress(e.to_string()))
    }

    /// Log in and return the backend's identifier for the user.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<ActorId> {
        let response = self
            .client
            .post(self.endpoint("users/login")?)
            .query(&[("email", email), (PARAM_PASSWORD, password)])
            .send()
            .await?;
        let body: Value = check_status(response).await?.json().await?;

        extract_actor_id(&body).ok_or_else(|| {
            ClientError::InvalidData("login response did not contain a user id".to_string())
        })
    }

    /// Create an account. Returns the backend's response body.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirmation: &str,
    ) -> ClientResult<Value> {
        let response = self
            .client
            .post(self.endpoint("users/")?)
            .query(&[
                ("nome", name),
                ("email", email),
                (PARAM_PASSWORD, password),
                ("confirma", confirmation),
            ])
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }

    /// Sessions the backend recorded today.
    pub async fn today_studies(&self, actor_id: &str) -> ClientResult<Value> {
        self.get_studies("study/today", actor_id, None).await
    }

    /// Sessions recorded on `date`.
    pub async fn history_studies(&self, actor_id: &str, date: NaiveDate) -> ClientResult<Value> {
        self.get_studies("study/history", actor_id, Some(date)).await
    }

    /// Sessions the backend has scheduled for `date`.
    pub async fn schedule_studies(&self, actor_id: &str, date: NaiveDate) -> ClientResult<Value> {
        self.get_studies("study/schedule", actor_id, Some(date)).await
    }

    /// Sessions recorded in the current week.
    pub async fn week_studies(&self, actor_id: &str) -> ClientResult<Value> {
        self.get_studies("study/week", actor_id, None).await
    }

    async fn get_studies(
        &self,
        path: &str,
        actor_id: &str,
        date: Option<NaiveDate>,
    ) -> ClientResult<Value> {
        require_actor(actor_id)?;
        let mut query = vec![(PARAM_USER_ID, actor_id.to_string())];
        if let Some(date) = date {
            query.push(("date", date.format("%Y-%m-%d").to_string()));
        }

        let response = self
            .client
            .get(self.endpoint(path)?)
            .query(&query)
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }
}

#[async_trait]
impl StudyBackend for HttpBackend {
    async fn submit_study(&self, submission: &StudySubmission) -> ClientResult<()> {
        require_actor(&submission.actor_id)?;

        let hours = submission.hours.to_string();
        let minutes = submission.minutes.to_string();
        let response = self
            .client
            .post(self.endpoint("study/register")?)
            .query(&[
                (PARAM_USER_ID, submission.actor_id.as_str()),
                (PARAM_SUBJECT, submission.subject.as_str()),
                (PARAM_TOPIC, submission.topic.as_str()),
                (PARAM_HOURS, hours.as_str()),
                (PARAM_MINUTES, minutes.as_str()),
                (PARAM_DIFFICULTY, submission.difficulty.as_str()),
            ])
            .send()
            .await?;
        check_status(response).await?;

        tracing::debug!(actor_id = %submission.actor_id, subject = %submission.subject, "Study submitted to backend");
        Ok(())
    }
}

fn require_actor(actor_id: &str) -> ClientResult<()> {
    if actor_id.trim().is_empty() {
        return Err(ClientError::MissingActor("user id is empty".to_string()));
    }
    Ok(())
}

async fn check_status(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status {
        status: status.as_u16(),
        body,
    })
}

/// Pull a user id out of a login response.
///
/// Accepts `user_id`, `userId` or `id`, as a string or number, either at the
/// top level or under a `user` object.
fn extract_actor_id(body: &Value) -> Option<ActorId> {
    for key in ["user_id", "userId", "id"] {
        match body.get(key) {
            Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    body.get("user").and_then(extract_actor_id)
}
