//! Attendance listing and recording

use auth::Identity;
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;
use tracing::info;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult, NOT_LINKED_NOTICE},
    models::{
        AttendanceForm, AttendanceListing, AttendancePage, AttendanceQuery, NewAttendance,
        Notice,
    },
    state::AppState,
    unit_of_work::UnitOfWork,
    validation::validate_attendance,
};

/// Number of pages needed for `total` entries
fn page_count(total: i64, per_page: i64) -> i64 {
    (total + per_page - 1) / per_page
}

/// Rows to skip for a 1-based page; `None` below page 1 or past `i64`
fn page_offset(page: i64, per_page: i64) -> Option<i64> {
    if page < 1 {
        return None;
    }
    (page - 1).checked_mul(per_page)
}

/// The entry must point at an existing student
async fn check_student(uow: &mut UnitOfWork, attendance: &NewAttendance) -> ApiResult<()> {
    if !uow.students().exists(attendance.student_id).await? {
        return Err(ApiError::Validation(
            "Selected student does not exist.".to_string(),
        ));
    }
    Ok(())
}

/// List attendance
///
/// Students get every entry of their own record. Staff page through all
/// entries, newest date first; a page past the end is not found.
pub async fn list_attendance(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    WithRejection(Query(query), _): WithRejection<Query<AttendanceQuery>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let mut uow = UnitOfWork::begin(&state.db_pool).await?;

    if !identity.role.is_staff() {
        let student_id = identity
            .linked_student()
            .ok_or(ApiError::Forbidden(NOT_LINKED_NOTICE))?;
        let student = uow
            .students()
            .find_by_id(student_id)
            .await?
            .ok_or(ApiError::Forbidden(NOT_LINKED_NOTICE))?;
        let items = uow.attendance().list_for_student(student_id).await?;

        return Ok(Json(AttendanceListing::Student { student, items }));
    }

    let per_page = i64::from(state.config.page_size);
    let page = query.page.unwrap_or(1);
    let offset = page_offset(page, per_page).ok_or(ApiError::NotFound)?;

    let total = uow.attendance().count().await?;
    let items = uow.attendance().list_page(per_page, offset).await?;

    if items.is_empty() && page != 1 {
        return Err(ApiError::NotFound);
    }

    Ok(Json(AttendanceListing::Staff(AttendancePage {
        items,
        page,
        per_page,
        total,
        pages: page_count(total, per_page),
    })))
}

/// Get an attendance entry by ID
pub async fn get_attendance(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let mut uow = UnitOfWork::begin(&state.db_pool).await?;
    let entry = uow.attendance().find_by_id(id).await?.ok_or(ApiError::NotFound)?;

    Ok(Json(entry))
}

/// Record attendance for a student
pub async fn add_attendance(
    State(state): State<AppState>,
    WithRejection(Json(form), _): WithRejection<Json<AttendanceForm>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let new_attendance = validate_attendance(&form).map_err(ApiError::Validation)?;

    let mut uow = UnitOfWork::begin(&state.db_pool).await?;
    check_student(&mut uow, &new_attendance).await?;

    let attendance = uow
        .attendance()
        .create(&new_attendance)
        .await
        .map_err(|e| ApiError::from_write(e, "Attendance"))?;
    uow.commit().await?;

    Ok((StatusCode::CREATED, Json(attendance)))
}

/// Replace the fields of an attendance entry
pub async fn edit_attendance(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
    WithRejection(Json(form), _): WithRejection<Json<AttendanceForm>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let mut uow = UnitOfWork::begin(&state.db_pool).await?;
    if uow.attendance().find_by_id(id).await?.is_none() {
        return Err(ApiError::NotFound);
    }

    let changes = validate_attendance(&form).map_err(ApiError::Validation)?;
    check_student(&mut uow, &changes).await?;

    let attendance = uow
        .attendance()
        .update(id, &changes)
        .await
        .map_err(|e| ApiError::from_write(e, "Attendance"))?
        .ok_or(ApiError::NotFound)?;
    uow.commit().await?;

    info!("Attendance {} updated", id);
    Ok(Json(attendance))
}

/// Delete an attendance entry
pub async fn delete_attendance(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let mut uow = UnitOfWork::begin(&state.db_pool).await?;
    if !uow.attendance().delete(id).await? {
        return Err(ApiError::NotFound);
    }
    uow.commit().await?;

    Ok(Json(Notice::new("Attendance deleted.")))
}
