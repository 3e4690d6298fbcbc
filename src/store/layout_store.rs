use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::AppError;
use crate::models::LayoutPrefs;
use crate::storage::{self, LAYOUT_STORAGE_KEY, Storage};

pub struct LayoutStore {
    prefs: Mutex<LayoutPrefs>,
    storage: Arc<dyn Storage>,
}

impl LayoutStore {
    pub async fn load(storage: Arc<dyn Storage>) -> Result<Self, AppError> {
        let prefs = storage::load_state::<LayoutPrefs>(storage.as_ref(), LAYOUT_STORAGE_KEY)
            .await?
            .unwrap_or_default();

        Ok(Self {
            prefs: Mutex::new(prefs),
            storage,
        })
    }

    pub async fn prefs(&self) -> LayoutPrefs {
        *self.prefs.lock().await
    }

    pub async fn toggle_sidebar(&self) -> Result<LayoutPrefs, AppError> {
        let mut prefs = self.prefs.lock().await;
        prefs.sidebar_open = !prefs.sidebar_open;
        storage::save_state(self.storage.as_ref(), LAYOUT_STORAGE_KEY, &*prefs).await?;
        Ok(*prefs)
    }

    pub async fn set_sidebar_open(&self, open: bool) -> Result<LayoutPrefs, AppError> {
        let mut prefs = self.prefs.lock().await;
        prefs.sidebar_open = open;
        storage::save_state(self.storage.as_ref(), LAYOUT_STORAGE_KEY, &*prefs).await?;
        Ok(*prefs)
    }
}
