use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::debounce::Debouncer;
use crate::models::CourseDraftFields;
use crate::store::DraftStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMode {
    #[default]
    Create,
    Edit,
}

/// State of the course form at one moment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSnapshot {
    #[serde(default)]
    pub mode: FormMode,
    /// Whether the user has touched any field.
    #[serde(default)]
    pub dirty: bool,
    #[serde(default)]
    pub data: CourseDraftFields,
}

impl FormSnapshot {
    pub fn should_save(&self) -> bool {
        self.mode == FormMode::Create && self.dirty
    }
}

/// A snapshot tagged with the draft generation it was recorded in.
#[derive(Debug, Clone)]
struct Pending {
    generation: u64,
    snapshot: FormSnapshot,
}

/// Writes the create form to the draft store once edits settle.
pub struct DraftAutosaver {
    drafts: Arc<DraftStore>,
    changes: Debouncer<Option<Pending>>,
    worker: JoinHandle<()>,
}

impl DraftAutosaver {
    pub fn spawn(drafts: Arc<DraftStore>, delay: Duration) -> Self {
        let changes: Debouncer<Option<Pending>> = Debouncer::new(delay, None);
        let mut settled = changes.subscribe();

        let store = drafts.clone();
        let worker = tokio::spawn(async move {
            while settled.changed().await.is_ok() {
                let pending = settled.borrow_and_update().clone();
                let Some(Pending { generation, snapshot }) = pending else {
                    continue;
                };
                if !snapshot.should_save() {
                    continue;
                }

                match store.save_draft_in(generation, snapshot.data).await {
                    Ok(Some(draft)) => debug!("autosaved course draft at {}", draft.timestamp),
                    Ok(None) => {}
                    Err(e) => warn!("course draft autosave failed: {}", e),
                }
            }
        });

        Self {
            drafts,
            changes,
            worker,
        }
    }

    pub fn record(&self, snapshot: FormSnapshot) {
        self.changes.push(Some(Pending {
            generation: self.drafts.generation(),
            snapshot,
        }));
    }

    /// Drops an edit that has not settled yet, e.g. after the form was submitted.
    pub fn discard_pending(&self) {
        self.changes.cancel();
    }
}

impl Drop for DraftAutosaver {
    fn drop(&mut self) {
        self.worker.abort();
    }
}
