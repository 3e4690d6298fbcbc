use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration as StdDuration;

use async_trait::async_trait;

use chrono::{Duration, TimeZone, Utc};
use coursedesk::clock::ManualClock;
use coursedesk::models::{CourseDraftFields, Level};
use coursedesk::services::{DraftAutosaver, FormMode, FormSnapshot};
use coursedesk::error::AppError;
use coursedesk::storage::{DRAFT_STORAGE_KEY, MemoryStorage, Storage};
use tokio::sync::Semaphore;
use coursedesk::store::DraftStore;

async fn setup() -> (Arc<MemoryStorage>, Arc<ManualClock>, Arc<DraftStore>) {
    let storage = Arc::new(MemoryStorage::new());
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap(),
    ));
    let drafts = DraftStore::load(storage.clone(), clock.clone())
        .await
        .expect("Failed to load draft store");
    (storage, clock, Arc::new(drafts))
}

fn titled(title: &str) -> CourseDraftFields {
    CourseDraftFields {
        title: Some(title.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_draft_expires_after_ten_minutes() {
    let (storage, clock, drafts) = setup().await;
    drafts.save_draft(titled("Partial")).await.unwrap();

    clock.advance(Duration::minutes(9));
    assert!(drafts.has_draft().await.unwrap());

    clock.advance(Duration::minutes(2));
    assert!(!drafts.has_draft().await.unwrap());
    assert!(drafts.peek().await.is_none());

    let raw = storage.raw_entry(DRAFT_STORAGE_KEY).unwrap();
    assert!(raw.contains("\"courseDraft\":null"));
}

#[tokio::test]
async fn test_draft_at_exactly_ten_minutes_is_still_valid() {
    let (_storage, clock, drafts) = setup().await;
    drafts.save_draft(titled("Boundary")).await.unwrap();

    clock.advance(Duration::minutes(10));
    assert!(drafts.has_draft().await.unwrap());
}

#[tokio::test]
async fn test_blank_draft_is_not_offered() {
    let (_storage, _clock, drafts) = setup().await;
    drafts
        .save_draft(CourseDraftFields {
            title: Some("   ".to_string()),
            level: Some(Level::Advanced),
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(!drafts.has_draft().await.unwrap());
    assert!(drafts.restore().await.unwrap().is_none());
    // blank drafts are not purged, only ignored
    assert!(drafts.peek().await.is_some());
}

#[tokio::test]
async fn test_restore_returns_saved_fields() {
    let (_storage, _clock, drafts) = setup().await;
    let fields = CourseDraftFields {
        title: Some("Half written".to_string()),
        instructor: Some("Linus".to_string()),
        level: Some(Level::Intermediate),
        ..Default::default()
    };
    drafts.save_draft(fields.clone()).await.unwrap();

    assert_eq!(drafts.restore().await.unwrap(), Some(fields));
}

#[tokio::test]
async fn test_clear_draft() {
    let (_storage, _clock, drafts) = setup().await;
    drafts.save_draft(titled("Gone soon")).await.unwrap();

    drafts.clear_draft().await.unwrap();
    assert!(!drafts.has_draft().await.unwrap());
}

#[tokio::test]
async fn test_draft_survives_reload() {
    let (storage, clock, drafts) = setup().await;
    drafts.save_draft(titled("Keep me")).await.unwrap();

    let reloaded = DraftStore::load(storage, clock).await.unwrap();
    assert_eq!(reloaded.restore().await.unwrap(), Some(titled("Keep me")));
}

#[tokio::test]
async fn test_is_expired_treats_missing_draft_as_expired() {
    let (_storage, _clock, drafts) = setup().await;
    assert!(drafts.is_expired(None));
}

#[tokio::test(start_paused = true)]
async fn test_autosaver_saves_only_the_settled_snapshot() {
    let (_storage, _clock, drafts) = setup().await;
    let saver = DraftAutosaver::spawn(drafts.clone(), StdDuration::from_millis(1000));

    for title in ["P", "Pa", "Partial"] {
        saver.record(FormSnapshot {
            mode: FormMode::Create,
            dirty: true,
            data: titled(title),
        });
        tokio::time::sleep(StdDuration::from_millis(200)).await;
    }
    assert!(drafts.peek().await.is_none());

    tokio::time::sleep(StdDuration::from_millis(1000)).await;
    let draft = drafts.peek().await.expect("draft was not autosaved");
    assert_eq!(draft.data, titled("Partial"));
}

#[tokio::test(start_paused = true)]
async fn test_autosaver_ignores_edit_mode_and_untouched_forms() {
    let (_storage, _clock, drafts) = setup().await;
    let saver = DraftAutosaver::spawn(drafts.clone(), StdDuration::from_millis(500));

    saver.record(FormSnapshot {
        mode: FormMode::Edit,
        dirty: true,
        data: titled("Editing existing"),
    });
    tokio::time::sleep(StdDuration::from_millis(600)).await;

    saver.record(FormSnapshot {
        mode: FormMode::Create,
        dirty: false,
        data: titled("Untouched"),
    });
    tokio::time::sleep(StdDuration::from_millis(600)).await;

    assert!(drafts.peek().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_autosaver_discard_pending_drops_unsettled_edit() {
    let (_storage, _clock, drafts) = setup().await;
    let saver = DraftAutosaver::spawn(drafts.clone(), StdDuration::from_millis(500));

    saver.record(FormSnapshot {
        mode: FormMode::Create,
        dirty: true,
        data: titled("Submitted"),
    });
    saver.discard_pending();
    tokio::time::sleep(StdDuration::from_millis(1000)).await;

    assert!(drafts.peek().await.is_none());
}

/// Storage whose writes wait for a permit while the gate is closed.
struct GatedStorage {
    inner: MemoryStorage,
    closed: AtomicBool,
    permits: Semaphore,
}

impl GatedStorage {
    fn new() -> Self {
        Self {
            inner: MemoryStorage::new(),
            closed: AtomicBool::new(false),
            permits: Semaphore::new(0),
        }
    }

    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    fn open(&self) {
        self.closed.store(false, Ordering::SeqCst);
        self.permits.add_permits(1);
    }

    async fn wait(&self) {
        if self.closed.load(Ordering::SeqCst) {
            self.permits.acquire().await.unwrap().forget();
        }
    }
}

#[async_trait]
impl Storage for GatedStorage {
    async fn get_entry(&self, key: &str) -> Result<Option<String>, AppError> {
        self.inner.get_entry(key).await
    }

    async fn set_entry(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.wait().await;
        self.inner.set_entry(key, value).await
    }

    async fn remove_entry(&self, key: &str) -> Result<(), AppError> {
        self.wait().await;
        self.inner.remove_entry(key).await
    }
}

#[tokio::test(start_paused = true)]
async fn test_clear_supersedes_autosave_waiting_on_slow_write() {
    let storage = Arc::new(GatedStorage::new());
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap(),
    ));
    let drafts = Arc::new(DraftStore::load(storage.clone(), clock).await.unwrap());
    let saver = DraftAutosaver::spawn(drafts.clone(), StdDuration::from_millis(100));

    saver.record(FormSnapshot {
        mode: FormMode::Create,
        dirty: true,
        data: titled("Submitted already"),
    });

    // the clear holds the draft lock while its write is stuck
    storage.close();
    let clearing = {
        let drafts = drafts.clone();
        tokio::spawn(async move { drafts.clear_draft().await })
    };

    // the settled snapshot reaches the worker, which queues behind the clear
    tokio::time::sleep(StdDuration::from_millis(300)).await;
    assert!(!clearing.is_finished());

    storage.open();
    clearing.await.unwrap().unwrap();
    tokio::time::sleep(StdDuration::from_millis(300)).await;

    assert!(drafts.peek().await.is_none());
    assert!(!drafts.has_draft().await.unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_autosave_after_clear_is_kept() {
    let (_storage, _clock, drafts) = setup().await;
    let saver = DraftAutosaver::spawn(drafts.clone(), StdDuration::from_millis(100));

    drafts.clear_draft().await.unwrap();
    saver.record(FormSnapshot {
        mode: FormMode::Create,
        dirty: true,
        data: titled("Next course"),
    });
    tokio::time::sleep(StdDuration::from_millis(300)).await;

    assert_eq!(drafts.peek().await.unwrap().data, titled("Next course"));
}
