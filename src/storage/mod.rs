pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::warn;

use crate::error::AppError;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

pub const COURSE_STORAGE_KEY: &str = "course-storage";
pub const DRAFT_STORAGE_KEY: &str = "course-form-draft-storage";
pub const LAYOUT_STORAGE_KEY: &str = "layout-storage";

const ENVELOPE_VERSION: u32 = 0;

/// Durable key/value storage, one entry per logical store.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn get_entry(&self, key: &str) -> Result<Option<String>, AppError>;
    async fn set_entry(&self, key: &str, value: &str) -> Result<(), AppError>;
    async fn remove_entry(&self, key: &str) -> Result<(), AppError>;
}

/// Wrapper written around every persisted state.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub state: T,
    #[serde(default)]
    pub version: u32,
}

/// Key an unreadable entry is moved to before it is treated as missing.
pub fn unreadable_key(key: &str) -> String {
    format!("{}.unreadable", key)
}

/// Reads and decodes the state stored under `key`.
/// An entry that cannot be decoded is copied to `unreadable_key(key)`
/// and then treated as missing, so a later write cannot lose it.
pub async fn load_state<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
) -> Result<Option<T>, AppError> {
    let Some(raw) = storage.get_entry(key).await? else {
        return Ok(None);
    };

    match serde_json::from_str::<Envelope<T>>(&raw) {
        Ok(envelope) => Ok(Some(envelope.state)),
        Err(e) => {
            let backup = unreadable_key(key);
            warn!("entry {} is unreadable, keeping a copy in {}: {}", key, backup, e);
            storage.set_entry(&backup, &raw).await?;
            Ok(None)
        }
    }
}

pub async fn save_state<T: Serialize>(
    storage: &dyn Storage,
    key: &str,
    state: &T,
) -> Result<(), AppError> {
    let raw = serde_json::to_string(&Envelope {
        state,
        version: ENVELOPE_VERSION,
    })?;
    storage.set_entry(key, &raw).await
}
