pub mod course;
pub mod draft;
pub mod layout;
pub mod user;

pub use course::{Course, CourseId, CoursePatch, Level, NewCourse};
pub use draft::{CourseDraftFields, Draft};
pub use layout::LayoutPrefs;
pub use user::{User, placeholder_users};
