pub mod autosave;

pub use autosave::{DraftAutosaver, FormMode, FormSnapshot};
