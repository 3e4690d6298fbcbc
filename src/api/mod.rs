use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query};
use axum::routing::post;
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::Deserialize;

use crate::error::AppError;
use crate::forms::{CourseForm, CoursePatchForm};
use crate::models::*;
use crate::services::FormSnapshot;
use crate::state::AppState;
use crate::view::{self, ListQuery, PAGE_SIZE, Projection, SortKey, SortOrder, SortState};

#[derive(Deserialize)]
struct CourseListParams {
    #[serde(default)]
    search: String,
    sort: Option<SortKey>,
    order: Option<SortOrder>,
    #[serde(default = "first_page")]
    pages: usize,
}

fn first_page() -> usize {
    1
}

impl CourseListParams {
    fn query(&self) -> ListQuery {
        let sort = match (self.sort, self.order) {
            (Some(key), Some(order)) => SortState::new(key, order),
            (Some(key), None) => SortState::new(key, key.default_order()),
            (None, Some(order)) => SortState::new(SortState::default().key, order),
            (None, None) => SortState::default(),
        };
        ListQuery {
            search: self.search.clone(),
            sort,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutUpdate {
    sidebar_open: bool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/courses", get(list_courses).post(create_course))
        .route(
            "/courses/{id}",
            get(get_course).patch(update_course).delete(delete_course),
        )
        .route(
            "/drafts/course",
            get(get_draft).put(autosave_draft).delete(clear_draft),
        )
        .route("/layout", get(get_layout).put(put_layout))
        .route("/layout/sidebar/toggle", post(toggle_sidebar))
        .route("/users", get(list_users))
        .with_state(state)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn list_courses(
    State(state): State<AppState>,
    Query(params): Query<CourseListParams>,
) -> Result<Json<Projection>, AppError> {
    let courses = state.courses.sorted_list().await;
    let projection = view::project(&courses, &params.query(), params.pages, PAGE_SIZE);
    Ok(Json(projection))
}

async fn create_course(
    State(state): State<AppState>,
    payload: Result<Json<CourseForm>, JsonRejection>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let Json(form) = payload?;
    let new = NewCourse::try_from(form)?;
    let course = state.courses.create(new).await?;

    state.autosaver.discard_pending();
    state.drafts.clear_draft().await?;

    Ok((StatusCode::CREATED, Json(course)))
}

async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<CourseId>,
) -> Result<Json<Course>, AppError> {
    let course = state.courses.get_by_id(id).await.ok_or(AppError::NotFound)?;
    Ok(Json(course))
}

async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<CourseId>,
    payload: Result<Json<CoursePatchForm>, JsonRejection>,
) -> Result<Json<Course>, AppError> {
    let Json(form) = payload?;
    let patch = CoursePatch::try_from(form)?;
    let course = state.courses.update(id, patch).await?;
    Ok(Json(course))
}

async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<CourseId>,
) -> Result<StatusCode, AppError> {
    state.courses.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_draft(State(state): State<AppState>) -> Result<Json<CourseDraftFields>, AppError> {
    let draft = state.drafts.restore().await?.ok_or(AppError::NotFound)?;
    Ok(Json(draft))
}

async fn autosave_draft(
    State(state): State<AppState>,
    payload: Result<Json<FormSnapshot>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(snapshot) = payload?;
    state.autosaver.record(snapshot);
    Ok(StatusCode::ACCEPTED)
}

async fn clear_draft(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.autosaver.discard_pending();
    state.drafts.clear_draft().await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_layout(State(state): State<AppState>) -> Json<LayoutPrefs> {
    Json(state.layout.prefs().await)
}

async fn put_layout(
    State(state): State<AppState>,
    payload: Result<Json<LayoutUpdate>, JsonRejection>,
) -> Result<Json<LayoutPrefs>, AppError> {
    let Json(update) = payload?;
    let prefs = state.layout.set_sidebar_open(update.sidebar_open).await?;
    Ok(Json(prefs))
}

async fn toggle_sidebar(State(state): State<AppState>) -> Result<Json<LayoutPrefs>, AppError> {
    let prefs = state.layout.toggle_sidebar().await?;
    Ok(Json(prefs))
}

async fn list_users() -> Json<Vec<User>> {
    Json(placeholder_users())
}
