pub mod course_store;
pub mod draft_store;
pub mod layout_store;

pub use course_store::{CourseStore, seed_courses};
pub use draft_store::{DRAFT_EXPIRY_MS, DraftStore};
pub use layout_store::LayoutStore;
