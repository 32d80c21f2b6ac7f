//! The entity store: sole owner of subjects, study logs, reviews and the
//! user profile.
//!
//! Every mutation updates memory first, then queues a snapshot of each
//! touched collection on the [`PersistenceWriter`]. Readers always see the
//! in-memory state, whatever the writer or the backend mirror are doing.

use std::sync::Arc;

use analytics::{compute_analytics, AnalyticsView};
use serde::de::DeserializeOwned;
use serde::Serialize;
use study::{
    new_id, Clock, LogId, ProfileUpdate, Review, ReviewId, StudyLog, StudyPayload, Subject,
    SubjectId, UserProfile,
};
use study_client::{ActorResolver, StudySubmission};
use tokio::sync::broadcast;

use crate::config::ScheduleConfig;
use crate::error::StoreError;
use crate::mirror::{MirrorEvent, MirrorHandle, MirrorJob};
use crate::persistence::{CollectionKey, KeyValueStore, PersistenceWriter, SeedData};
use crate::srs;

struct Mirror {
    handle: MirrorHandle,
    actors: Arc<dyn ActorResolver>,
}

pub struct EntityStore {
    profile: UserProfile,
    subjects: Vec<Subject>,
    /// Most recent first.
    logs: Vec<StudyLog>,
    reviews: Vec<Review>,
    writer: PersistenceWriter,
    clock: Arc<dyn Clock>,
    mirror: Option<Mirror>,
    config: ScheduleConfig,
}

impl EntityStore {
    /// Populate the store from `kv`.
    ///
    /// Each collection is read exactly once. A key that is absent or
    /// undecodable is replaced by its `seed` value, which is written back
    /// before this returns. A key that cannot be read at all also falls back
    /// to `seed` in memory, but the stored value is left untouched.
    pub async fn load<K: KeyValueStore>(
        kv: Arc<K>,
        seed: SeedData,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let SeedData {
            profile,
            subjects,
            logs,
            reviews,
        } = seed;

        let profile = load_collection(kv.as_ref(), CollectionKey::User, profile).await;
        let subjects = load_collection(kv.as_ref(), CollectionKey::Subjects, subjects).await;
        let logs = load_collection(kv.as_ref(), CollectionKey::Logs, logs).await;
        let reviews = load_collection(kv.as_ref(), CollectionKey::Reviews, reviews).await;

        tracing::info!(
            subjects = subjects.len(),
            logs = logs.len(),
            reviews = reviews.len(),
            "Entity store loaded"
        );

        Self {
            profile,
            subjects,
            logs,
            reviews,
            writer: PersistenceWriter::spawn(kv),
            clock,
            mirror: None,
            config: ScheduleConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ScheduleConfig) -> Self {
        self.config = config;
        self
    }

    /// Mirror every new study session to a backend, attributed to the actor
    /// `actors` resolves at registration time.
    pub fn with_mirror(mut self, handle: MirrorHandle, actors: Arc<dyn ActorResolver>) -> Self {
        self.mirror = Some(Mirror { handle, actors });
        self
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Study sessions
    // ------------------------------------------------------------------

    /// Record a study session at the current time.
    ///
    /// A fresh session spawns one review per configured offset. A session
    /// that carries `origin_id` instead completes that review and spawns
    /// nothing.
    ///
    /// The log is in memory and queued for persistence before any backend
    /// work starts. If mirroring is configured but nobody is logged in, the
    /// log stays and [`StoreError::MissingActor`] reports its ID.
    pub fn register_study(&mut self, payload: StudyPayload) -> Result<LogId, StoreError> {
        if payload.origin_id.is_none() && !self.has_subject(&payload.subject) {
            return Err(StoreError::UnknownSubject(payload.subject));
        }

        let now = self.clock.now();
        let log = StudyLog {
            id: new_id(),
            subject: payload.subject.clone(),
            topic: payload.topic.clone(),
            difficulty: payload.difficulty,
            duration: payload.coerced_duration(),
            occurred_at: now,
            origin_id: payload.origin_id,
        };
        let log_id = log.id;

        match log.origin_id {
            Some(review_id) => match self.reviews.iter_mut().find(|r| r.id == review_id) {
                Some(review) => {
                    if review.complete(now) {
                        tracing::debug!(%review_id, "Review marked done by study session");
                    }
                }
                None => {
                    tracing::warn!(%review_id, %log_id, "Study completes an unknown review");
                }
            },
            None => {
                let batch = srs::generate_reviews(&log, &self.config.review_offsets);
                tracing::debug!(%log_id, count = batch.len(), "Reviews scheduled");
                self.reviews.extend(batch);
            }
        }

        tracing::info!(
            %log_id,
            subject = %log.subject,
            minutes = log.duration,
            review = log.origin_id.is_some(),
            "Study registered"
        );

        let submission_minutes = log.duration;
        let difficulty = log.difficulty;
        self.logs.insert(0, log);
        self.persist(CollectionKey::Logs);
        self.persist(CollectionKey::Reviews);

        if let Some(mirror) = &self.mirror {
            let actor_id = mirror
                .actors
                .resolve_actor_id()
                .map_err(|source| StoreError::MissingActor { log_id, source })?;
            mirror.handle.submit(MirrorJob {
                log_id,
                submission: StudySubmission::new(
                    actor_id,
                    payload.subject,
                    payload.topic,
                    submission_minutes,
                    difficulty.as_lowercase(),
                ),
            });
        }

        Ok(log_id)
    }

    /// Remove a study log. Reviews it spawned are kept.
    pub fn delete_study_log(&mut self, id: LogId) -> bool {
        let before = self.logs.len();
        self.logs.retain(|l| l.id != id);
        if self.logs.len() == before {
            tracing::debug!(log_id = %id, "Delete of unknown study log ignored");
            return false;
        }
        tracing::info!(log_id = %id, "Study log deleted");
        self.persist(CollectionKey::Logs);
        true
    }

    pub fn study_logs(&self) -> &[StudyLog] {
        &self.logs
    }

    /// Logs sorted by `occurred_at`, newest first.
    pub fn logs_by_recency(&self) -> Vec<&StudyLog> {
        let mut logs: Vec<&StudyLog> = self.logs.iter().collect();
        logs.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
        logs
    }

    // ------------------------------------------------------------------
    // Subjects
    // ------------------------------------------------------------------

    /// Create a subject. `color` falls back to the configured default.
    pub fn add_subject(&mut self, name: &str, color: Option<&str>) -> Result<SubjectId, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }
        if self.has_subject(name) {
            return Err(StoreError::DuplicateSubject(name.to_string()));
        }

        let subject = Subject {
            id: new_id(),
            name: name.to_string(),
            color: color
                .filter(|c| !c.trim().is_empty())
                .unwrap_or(self.config.fallback_color.as_str())
                .to_string(),
        };
        let id = subject.id;
        tracing::info!(subject_id = %id, name = %subject.name, "Subject added");
        self.subjects.push(subject);
        self.persist(CollectionKey::Subjects);
        Ok(id)
    }

    /// Remove a subject together with every review filed under its name.
    pub fn delete_subject(&mut self, id: SubjectId) -> Option<Subject> {
        let Some(index) = self.subjects.iter().position(|s| s.id == id) else {
            tracing::debug!(subject_id = %id, "Delete of unknown subject ignored");
            return None;
        };
        let subject = self.subjects.remove(index);

        let before = self.reviews.len();
        self.reviews.retain(|r| r.subject != subject.name);
        tracing::info!(
            subject_id = %id,
            name = %subject.name,
            reviews_removed = before - self.reviews.len(),
            "Subject deleted"
        );

        self.persist(CollectionKey::Subjects);
        self.persist(CollectionKey::Reviews);
        Some(subject)
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn subject_by_name(&self, name: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.name == name)
    }

    fn has_subject(&self, name: &str) -> bool {
        self.subject_by_name(name).is_some()
    }

    // ------------------------------------------------------------------
    // Reviews
    // ------------------------------------------------------------------

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn review(&self, id: ReviewId) -> Option<&Review> {
        self.reviews.iter().find(|r| r.id == id)
    }

    /// Pending reviews, earliest due first.
    pub fn pending_reviews(&self) -> Vec<&Review> {
        let mut pending: Vec<&Review> = self.reviews.iter().filter(|r| r.is_pending()).collect();
        pending.sort_by_key(|r| r.due_date);
        pending
    }

    /// Done reviews, most recently completed first.
    pub fn done_reviews(&self) -> Vec<&Review> {
        let mut done: Vec<&Review> = self.reviews.iter().filter(|r| r.is_done()).collect();
        done.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        done
    }

    /// Pending reviews due strictly before today.
    pub fn overdue_count(&self) -> usize {
        analytics::overdue_count(&self.reviews, self.clock.today())
    }

    /// Pending reviews due today or earlier.
    pub fn today_count(&self) -> usize {
        analytics::reviews_due_today(&self.reviews, self.clock.today())
    }

    pub fn analytics(&self) -> AnalyticsView {
        compute_analytics(
            &self.subjects,
            &self.logs,
            &self.reviews,
            self.clock.now(),
            &self.config.analytics,
        )
    }

    // ------------------------------------------------------------------
    // Profile
    // ------------------------------------------------------------------

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn update_profile(&mut self, update: ProfileUpdate) {
        self.profile.apply(update);
        tracing::info!("Profile updated");
        self.persist(CollectionKey::User);
    }

    /// Forget everything, in memory and on disk. The next [`load`](Self::load)
    /// starts from seed data again.
    pub fn delete_account(&mut self) {
        self.profile = UserProfile::default();
        self.subjects.clear();
        self.logs.clear();
        self.reviews.clear();
        for key in CollectionKey::ALL {
            self.writer.remove(key);
        }
        tracing::info!("Account deleted");
    }

    // ------------------------------------------------------------------
    // Background work
    // ------------------------------------------------------------------

    /// Wait for every queued persistence write to land.
    pub async fn flush(&self) -> Result<(), StoreError> {
        self.writer.flush().await?;
        Ok(())
    }

    /// Outcomes of backend submissions, if mirroring is configured.
    pub fn mirror_events(&self) -> Option<broadcast::Receiver<MirrorEvent>> {
        self.mirror.as_ref().map(|m| m.handle.subscribe())
    }

    /// Abandon pending backend submissions. Local state is unaffected.
    pub fn cancel_mirroring(&self) {
        if let Some(mirror) = &self.mirror {
            mirror.handle.cancel();
        }
    }

    /// Flush persistence and let the mirror drain.
    pub async fn close(self) -> Result<(), StoreError> {
        self.writer.flush().await?;
        if let Some(mirror) = self.mirror {
            mirror.handle.shutdown().await;
        }
        Ok(())
    }

    fn persist(&self, key: CollectionKey) {
        let snapshot = match key {
            CollectionKey::User => serde_json::to_value(&self.profile),
            CollectionKey::Subjects => serde_json::to_value(&self.subjects),
            CollectionKey::Logs => serde_json::to_value(&self.logs),
            CollectionKey::Reviews => serde_json::to_value(&self.reviews),
        };
        match snapshot {
            Ok(value) => self.writer.save(key, value),
            Err(e) => tracing::error!(%key, "Failed to serialize collection: {}", e),
        }
    }
}

async fn load_collection<K, T>(kv: &K, key: CollectionKey, seed: T) -> T
where
    K: KeyValueStore,
    T: Serialize + DeserializeOwned,
{
    match kv.get(key.as_str()).await {
        Ok(Some(value)) => match serde_json::from_value(value) {
            Ok(decoded) => return decoded,
            Err(e) => tracing::warn!(%key, "Stored collection is corrupt, reseeding: {}", e),
        },
        Ok(None) => tracing::info!(%key, "Collection absent, seeding defaults"),
        Err(e) => {
            tracing::warn!(%key, "Failed to read collection, using defaults for this session: {}", e);
            return seed;
        }
    }

    match serde_json::to_value(&seed) {
        Ok(value) => {
            if let Err(e) = kv.set(key.as_str(), &value).await {
                tracing::warn!(%key, "Failed to persist seed data: {}", e);
            }
        }
        Err(e) => tracing::error!(%key, "Failed to serialize seed data: {}", e),
    }
    seed
}
