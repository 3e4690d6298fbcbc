pub mod course;

pub use course::{CourseForm, CoursePatchForm};
