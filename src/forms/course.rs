use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::error::AppError;
use crate::models::{CoursePatch, Level, NewCourse};

#[derive(Debug, Deserialize, Validate)]
pub struct CourseForm {
    #[validate(length(min = 5, max = 100, message = "Title must be 5-100 characters"))]
    pub title: String,
    #[validate(length(min = 10, max = 200, message = "Description must be 10-200 characters"))]
    pub description: String,
    #[validate(length(min = 3, max = 200, message = "Instructor must be 3-200 characters"))]
    pub instructor: String,
    pub level: Level,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct CoursePatchForm {
    #[validate(length(min = 5, max = 100, message = "Title must be 5-100 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 10, max = 200, message = "Description must be 10-200 characters"))]
    pub description: Option<String>,
    #[validate(length(min = 3, max = 200, message = "Instructor must be 3-200 characters"))]
    pub instructor: Option<String>,
    pub level: Option<Level>,
    pub image: Option<String>,
}

impl From<ValidationErrors> for AppError {
    fn from(value: ValidationErrors) -> Self {
        AppError::Validation(value.to_string())
    }
}

fn trimmed(value: String) -> String {
    value.trim().to_string()
}

impl TryFrom<CourseForm> for NewCourse {
    type Error = AppError;

    fn try_from(form: CourseForm) -> Result<Self, Self::Error> {
        let form = CourseForm {
            title: trimmed(form.title),
            description: trimmed(form.description),
            instructor: trimmed(form.instructor),
            ..form
        };
        form.validate()?;

        Ok(NewCourse {
            title: form.title,
            description: form.description,
            instructor: form.instructor,
            level: form.level,
            image: form.image.filter(|img| !img.trim().is_empty()),
        })
    }
}

impl TryFrom<CoursePatchForm> for CoursePatch {
    type Error = AppError;

    fn try_from(form: CoursePatchForm) -> Result<Self, Self::Error> {
        let form = CoursePatchForm {
            title: form.title.map(trimmed),
            description: form.description.map(trimmed),
            instructor: form.instructor.map(trimmed),
            ..form
        };
        form.validate()?;

        Ok(CoursePatch {
            title: form.title,
            description: form.description,
            instructor: form.instructor,
            level: form.level,
            image: form.image,
        })
    }
}
