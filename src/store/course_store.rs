use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::error::AppError;
use crate::models::{Course, CourseId, CoursePatch, Level, NewCourse};
use crate::storage::{self, COURSE_STORAGE_KEY, Storage};

#[derive(Debug, Serialize, Deserialize)]
struct PersistedCourses {
    courses: Vec<Course>,
}

/// Owner of the course collection.
///
/// Every mutation re-serializes the whole list while holding the write lock,
/// so readers never observe a half-applied change. If the write fails the
/// in-memory change is kept and the caller gets `AppError::Persistence`.
pub struct CourseStore {
    courses: RwLock<Vec<Course>>,
    storage: Arc<dyn Storage>,
    clock: Arc<dyn Clock>,
}

impl CourseStore {
    /// Loads the last persisted collection, or writes the seed list when there is none.
    pub async fn load(storage: Arc<dyn Storage>, clock: Arc<dyn Clock>) -> Result<Self, AppError> {
        let persisted = storage::load_state::<PersistedCourses>(storage.as_ref(), COURSE_STORAGE_KEY).await?;

        let store = match persisted {
            Some(state) => {
                info!("loaded {} courses from storage", state.courses.len());
                Self {
                    courses: RwLock::new(state.courses),
                    storage,
                    clock,
                }
            }
            None => {
                let seed = seed_courses(clock.now());
                info!("no stored courses, seeding {} defaults", seed.len());
                let store = Self {
                    courses: RwLock::new(seed),
                    storage,
                    clock,
                };
                let courses = store.courses.read().await;
                if let Err(e) = store.persist(&courses).await {
                    warn!("could not persist seed courses: {}", e);
                }
                drop(courses);
                store
            }
        };

        Ok(store)
    }

    pub async fn create(&self, new: NewCourse) -> Result<Course, AppError> {
        let mut courses = self.courses.write().await;
        let now = self.clock.now();

        let course = Course {
            id: next_id(&courses, now)?,
            title: new.title,
            description: new.description,
            instructor: new.instructor,
            level: new.level,
            image: new.image.filter(|img| !img.is_empty()),
            created_at: now,
            updated_at: now,
        };
        courses.push(course.clone());
        info!("created course {} ({})", course.id, course.title);

        self.persist(&courses).await?;
        Ok(course)
    }

    /// Merges `patch` onto the course and refreshes `updated_at`.
    /// Unknown ids are reported as `AppError::NotFound`.
    pub async fn update(&self, id: CourseId, patch: CoursePatch) -> Result<Course, AppError> {
        let mut courses = self.courses.write().await;
        let now = self.clock.now();

        let course = courses
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(AppError::NotFound)?;

        course.merge(patch);
        course.updated_at = now.max(course.created_at);
        let updated = course.clone();
        debug!("updated course {}", id);

        self.persist(&courses).await?;
        Ok(updated)
    }

    /// Removes the course. Returns whether anything was removed; a missing id is not an error.
    pub async fn delete(&self, id: CourseId) -> Result<bool, AppError> {
        let mut courses = self.courses.write().await;
        let before = courses.len();
        courses.retain(|c| c.id != id);

        if courses.len() == before {
            debug!("delete of unknown course {} ignored", id);
            return Ok(false);
        }

        info!("deleted course {}", id);
        self.persist(&courses).await?;
        Ok(true)
    }

    pub async fn get_by_id(&self, id: CourseId) -> Option<Course> {
        self.courses.read().await.iter().find(|c| c.id == id).cloned()
    }

    /// Snapshot in insertion order.
    pub async fn list(&self) -> Vec<Course> {
        self.courses.read().await.clone()
    }

    /// Snapshot ordered newest first by `created_at`.
    pub async fn sorted_list(&self) -> Vec<Course> {
        let mut courses = self.list().await;
        courses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        courses
    }

    async fn persist(&self, courses: &[Course]) -> Result<(), AppError> {
        let state = PersistedCourses {
            courses: courses.to_vec(),
        };
        storage::save_state(self.storage.as_ref(), COURSE_STORAGE_KEY, &state)
            .await
            .map_err(|e| {
                warn!("course list kept in memory only: {}", e);
                match e {
                    persistence @ AppError::Persistence(_) => persistence,
                    other => AppError::Persistence(other.to_string()),
                }
            })
    }
}

/// Millisecond timestamp, bumped past the largest existing id on collision.
fn next_id(courses: &[Course], now: DateTime<Utc>) -> Result<CourseId, AppError> {
    let max_id = courses.iter().map(|c| c.id).max().unwrap_or(0);
    let after_max = max_id
        .checked_add(1)
        .ok_or_else(|| AppError::Conflict("no course id left after the largest stored id".to_string()))?;
    Ok(now.timestamp_millis().max(after_max))
}

pub fn seed_courses(now: DateTime<Utc>) -> Vec<Course> {
    let first = now - Duration::seconds(1);
    vec![
        Course {
            id: 1,
            title: "React Fundamentals".to_string(),
            description: "Learn the basics of React including components, props, state, and hooks."
                .to_string(),
            instructor: "John Smith".to_string(),
            level: Level::Beginner,
            image: None,
            created_at: first,
            updated_at: first,
        },
        Course {
            id: 2,
            title: "Advanced JavaScript".to_string(),
            description: "Deep dive into advanced JavaScript concepts and patterns.".to_string(),
            instructor: "Jane Doe".to_string(),
            level: Level::Advanced,
            image: None,
            created_at: now,
            updated_at: now,
        },
    ]
}
