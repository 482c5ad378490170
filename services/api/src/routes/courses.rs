//! Course management (staff only)

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;
use tracing::info;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    models::{CourseForm, Notice},
    state::AppState,
    unit_of_work::UnitOfWork,
    validation::validate_course,
};

/// List all courses ordered by code
pub async fn list_courses(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let mut uow = UnitOfWork::begin(&state.db_pool).await?;
    let courses = uow.courses().list().await?;

    Ok(Json(courses))
}

/// Get a course by ID
pub async fn get_course(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let mut uow = UnitOfWork::begin(&state.db_pool).await?;
    let course = uow.courses().find_by_id(id).await?.ok_or(ApiError::NotFound)?;

    Ok(Json(course))
}

/// Create a course
pub async fn add_course(
    State(state): State<AppState>,
    WithRejection(Json(form), _): WithRejection<Json<CourseForm>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let new_course = validate_course(&form).map_err(ApiError::Validation)?;

    let mut uow = UnitOfWork::begin(&state.db_pool).await?;
    let course = uow
        .courses()
        .create(&new_course)
        .await
        .map_err(|e| ApiError::from_write(e, "Course code"))?;
    uow.commit().await?;

    info!("Course {} added", course.code);
    Ok((StatusCode::CREATED, Json(course)))
}

/// Replace the code and title of a course
pub async fn edit_course(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
    WithRejection(Json(form), _): WithRejection<Json<CourseForm>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let mut uow = UnitOfWork::begin(&state.db_pool).await?;
    if !uow.courses().exists(id).await? {
        return Err(ApiError::NotFound);
    }

    let changes = validate_course(&form).map_err(ApiError::Validation)?;
    let course = uow
        .courses()
        .update(id, &changes)
        .await
        .map_err(|e| ApiError::from_write(e, "Course code"))?
        .ok_or(ApiError::NotFound)?;
    uow.commit().await?;

    info!("Course {} updated", course.code);
    Ok(Json(course))
}

/// Delete a course; its students stay, without a course
pub async fn delete_course(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let mut uow = UnitOfWork::begin(&state.db_pool).await?;
    if !uow.courses().delete(id).await? {
        return Err(ApiError::NotFound);
    }
    uow.commit().await?;

    Ok(Json(Notice::new("Course deleted.")))
}
