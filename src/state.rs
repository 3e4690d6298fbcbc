use std::sync::Arc;
use std::time::Duration;

use crate::clock::Clock;
use crate::error::AppError;
use crate::services::DraftAutosaver;
use crate::storage::Storage;
use crate::store::{CourseStore, DraftStore, LayoutStore};

#[derive(Clone)]
pub struct AppState {
    pub courses: Arc<CourseStore>,
    pub drafts: Arc<DraftStore>,
    pub layout: Arc<LayoutStore>,
    pub autosaver: Arc<DraftAutosaver>,
}

impl AppState {
    pub async fn build(
        storage: Arc<dyn Storage>,
        clock: Arc<dyn Clock>,
        autosave_delay: Duration,
    ) -> Result<Self, AppError> {
        let courses = Arc::new(CourseStore::load(storage.clone(), clock.clone()).await?);
        let drafts = Arc::new(DraftStore::load(storage.clone(), clock).await?);
        let layout = Arc::new(LayoutStore::load(storage).await?);
        let autosaver = Arc::new(DraftAutosaver::spawn(drafts.clone(), autosave_delay));

        Ok(Self {
            courses,
            drafts,
            layout,
            autosaver,
        })
    }
}
