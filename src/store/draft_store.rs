use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::clock::Clock;
use crate::error::AppError;
use crate::models::{CourseDraftFields, Draft};
use crate::storage::{self, DRAFT_STORAGE_KEY, Storage};

/// Drafts older than this many milliseconds are treated as absent.
pub const DRAFT_EXPIRY_MS: i64 = 10 * 60 * 1000;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedDraft {
    course_draft: Option<Draft>,
}

/// Holds the single in-progress create-form draft.
///
/// Every clear starts a new generation. Autosaves carry the generation they
/// were recorded in and are dropped once a clear has superseded it.
pub struct DraftStore {
    draft: Mutex<Option<Draft>>,
    generation: AtomicU64,
    storage: Arc<dyn Storage>,
    clock: Arc<dyn Clock>,
}

impl DraftStore {
    pub async fn load(storage: Arc<dyn Storage>, clock: Arc<dyn Clock>) -> Result<Self, AppError> {
        let draft = storage::load_state::<PersistedDraft>(storage.as_ref(), DRAFT_STORAGE_KEY)
            .await?
            .and_then(|state| state.course_draft);

        Ok(Self {
            draft: Mutex::new(draft),
            generation: AtomicU64::new(0),
            storage,
            clock,
        })
    }

    /// Overwrites the stored draft with `data`, stamped with the current time.
    pub async fn save_draft(&self, data: CourseDraftFields) -> Result<Draft, AppError> {
        let mut current = self.draft.lock().await;
        self.write(&mut current, data).await
    }

    /// Like `save_draft`, but skipped when the draft was cleared after `generation`.
    /// Returns `None` when skipped.
    pub async fn save_draft_in(
        &self,
        generation: u64,
        data: CourseDraftFields,
    ) -> Result<Option<Draft>, AppError> {
        let mut current = self.draft.lock().await;
        if self.generation() != generation {
            debug!("dropping course draft from cleared generation {}", generation);
            return Ok(None);
        }
        self.write(&mut current, data).await.map(Some)
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub async fn clear_draft(&self) -> Result<(), AppError> {
        let mut current = self.draft.lock().await;
        self.generation.fetch_add(1, Ordering::SeqCst);
        if current.take().is_some() {
            debug!("course draft cleared");
        }
        self.persist(&current).await
    }

    async fn write(
        &self,
        current: &mut Option<Draft>,
        data: CourseDraftFields,
    ) -> Result<Draft, AppError> {
        let draft = Draft {
            data,
            timestamp: self.clock.now().timestamp_millis(),
        };
        *current = Some(draft.clone());
        debug!("course draft saved at {}", draft.timestamp);

        self.persist(current).await?;
        Ok(draft)
    }

    pub fn is_expired(&self, draft: Option<&Draft>) -> bool {
        match draft {
            None => true,
            Some(draft) => {
                self.clock.now().timestamp_millis() - draft.timestamp > DRAFT_EXPIRY_MS
            }
        }
    }

    /// True when a non-expired draft with some content exists.
    /// An expired draft is purged as a side effect.
    pub async fn has_draft(&self) -> Result<bool, AppError> {
        Ok(self.restore().await?.is_some())
    }

    /// Returns the draft fields to prefill the create form with, if any.
    pub async fn restore(&self) -> Result<Option<CourseDraftFields>, AppError> {
        let mut current = self.draft.lock().await;

        let Some(draft) = current.as_ref() else {
            return Ok(None);
        };

        if self.is_expired(Some(draft)) {
            info!("purging expired course draft from {}", draft.timestamp);
            *current = None;
            self.persist(&current).await?;
            return Ok(None);
        }

        if !draft.data.has_content() {
            return Ok(None);
        }

        Ok(Some(draft.data.clone()))
    }

    /// Raw stored draft, without the expiry check.
    pub async fn peek(&self) -> Option<Draft> {
        self.draft.lock().await.clone()
    }

    async fn persist(&self, draft: &Option<Draft>) -> Result<(), AppError> {
        let state = PersistedDraft {
            course_draft: draft.clone(),
        };
        storage::save_state(self.storage.as_ref(), DRAFT_STORAGE_KEY, &state).await
    }
}
