use std::sync::Arc;

use chrono::{Duration, FixedOffset, TimeZone};
use schedule::{EntityStore, JsonFileStore, MemoryStore, MirrorHandle, SeedData, StoreError};
use study::{Clock, FixedClock, StudyPayload};
use study_client::{MockBackend, StaticActor};

fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(
        FixedOffset::east_opt(-3 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 3, 19, 30, 0)
            .unwrap(),
    ))
}

#[tokio::test]
async fn study_then_complete_every_review() {
    let clock = clock();
    let kv = Arc::new(MemoryStore::new());
    let mut store = EntityStore::load(kv.clone(), SeedData::demo(clock.now()), clock.clone()).await;
    let logs_before = store.study_logs().len();
    let reviews_before = store.reviews().len();

    let log_id = store
        .register_study(StudyPayload::new("English", "Phrasal verbs", 40))
        .unwrap();

    let spawned: Vec<_> = store
        .reviews()
        .iter()
        .filter(|r| r.origin_log_id == log_id)
        .cloned()
        .collect();
    assert_eq!(spawned.len(), 3);
    let today = clock.today();
    for (review, offset) in spawned.iter().zip([1, 7, 14]) {
        assert_eq!(review.due_date, today + Duration::days(offset));
        assert!(review.is_pending());
    }

    for review in &spawned {
        clock.set(
            review
                .due_date
                .and_hms_opt(8, 0, 0)
                .unwrap()
                .and_local_timezone(FixedOffset::east_opt(-3 * 3600).unwrap())
                .unwrap(),
        );
        let completion = store.complete_review(review.id).unwrap().unwrap();
        let log = store.study_logs().iter().find(|l| l.id == completion).unwrap();
        assert_eq!(log.origin_id, Some(review.id));
    }

    // One log per completion, no review chains
    assert_eq!(store.study_logs().len(), logs_before + 4);
    assert_eq!(store.reviews().len(), reviews_before + 3);
    assert!(spawned
        .iter()
        .all(|r| store.review(r.id).is_some_and(|r| r.is_done() && r.completed_at.is_some())));

    store.flush().await.unwrap();
    let persisted = kv.peek("remind_logs").unwrap();
    assert_eq!(persisted.as_array().unwrap().len(), logs_before + 4);
}

#[tokio::test]
async fn deleting_a_subject_prunes_its_reviews() {
    let clock = clock();
    let mut store = EntityStore::load(
        Arc::new(MemoryStore::new()),
        SeedData::demo(clock.now()),
        clock.clone(),
    )
    .await;
    let other_reviews = store.reviews().iter().filter(|r| r.subject != "History").count();
    let history = store.subject_by_name("History").unwrap().id;

    store.delete_subject(history);

    assert!(store.reviews().iter().all(|r| r.subject != "History"));
    assert_eq!(store.reviews().len(), other_reviews);
}

#[tokio::test]
async fn state_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let clock = clock();

    let log_id = {
        let kv = Arc::new(JsonFileStore::new(dir.path().to_path_buf()));
        let mut store = EntityStore::load(kv, SeedData::empty(), clock.clone()).await;
        store.add_subject("Chemistry", Some("#00AA88")).unwrap();
        let log_id = store
            .register_study(StudyPayload::new("Chemistry", "Bonds", 25))
            .unwrap();
        store.close().await.unwrap();
        log_id
    };

    let kv = Arc::new(JsonFileStore::new(dir.path().to_path_buf()));
    let store = EntityStore::load(kv, SeedData::demo(clock.now()), clock).await;
    assert_eq!(store.subjects().len(), 1);
    assert_eq!(store.study_logs()[0].id, log_id);
    assert_eq!(store.reviews().len(), 3);
}

#[tokio::test]
async fn logged_out_mirroring_reports_missing_actor() {
    let clock = clock();
    let backend = Arc::new(MockBackend::accepting());
    let mut store = EntityStore::load(
        Arc::new(MemoryStore::new()),
        SeedData::demo(clock.now()),
        clock.clone(),
    )
    .await
    .with_mirror(
        MirrorHandle::spawn(backend.clone()),
        Arc::new(StaticActor::anonymous()),
    );
    let pending = store.pending_reviews()[0].id;

    let err = store.complete_review(pending).unwrap_err();

    assert!(matches!(err, StoreError::MissingActor { .. }));
    // The completion itself stands
    assert!(store.review(pending).unwrap().is_done());
    assert_eq!(store.study_logs()[0].id, err.saved_log_id().unwrap());
    store.close().await.unwrap();
    assert!(backend.calls().is_empty());
}
