//! Student records and linking them to user accounts (staff only)

use auth::Role;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    models::{AssignUserRequest, NewStudent, Notice, StudentForm, UserResponse},
    state::AppState,
    unit_of_work::UnitOfWork,
    validation::validate_student,
};

/// The selected course must exist when one is given
async fn check_course(uow: &mut UnitOfWork, student: &NewStudent) -> ApiResult<()> {
    if let Some(course_id) = student.course_id {
        if !uow.courses().exists(course_id).await? {
            return Err(ApiError::Validation(
                "Selected course does not exist.".to_string(),
            ));
        }
    }
    Ok(())
}

/// List all students with their course code
pub async fn list_students(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let mut uow = UnitOfWork::begin(&state.db_pool).await?;
    let students = uow.students().list().await?;

    Ok(Json(students))
}

/// Get a student by ID, with the linked account if any
pub async fn get_student(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let mut uow = UnitOfWork::begin(&state.db_pool).await?;
    let student = uow.students().find_by_id(id).await?.ok_or(ApiError::NotFound)?;
    let account = uow.users().find_by_student_id(id).await?;

    Ok(Json(json!({
        "student": student,
        "account": account.as_ref().map(UserResponse::from),
    })))
}

/// Create a student record
pub async fn add_student(
    State(state): State<AppState>,
    WithRejection(Json(form), _): WithRejection<Json<StudentForm>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let new_student = validate_student(&form).map_err(ApiError::Validation)?;

    let mut uow = UnitOfWork::begin(&state.db_pool).await?;
    check_course(&mut uow, &new_student).await?;

    let student = uow
        .students()
        .create(&new_student)
        .await
        .map_err(|e| ApiError::from_write(e, "Student number"))?;
    uow.commit().await?;

    info!("Student {} added", student.student_number);
    Ok((StatusCode::CREATED, Json(student)))
}

/// Replace the fields of a student record
pub async fn edit_student(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
    WithRejection(Json(form), _): WithRejection<Json<StudentForm>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let mut uow = UnitOfWork::begin(&state.db_pool).await?;
    if !uow.students().exists(id).await? {
        return Err(ApiError::NotFound);
    }

    let changes = validate_student(&form).map_err(ApiError::Validation)?;
    check_course(&mut uow, &changes).await?;

    let student = uow
        .students()
        .update(id, &changes)
        .await
        .map_err(|e| ApiError::from_write(e, "Student number"))?
        .ok_or(ApiError::NotFound)?;
    uow.commit().await?;

    info!("Student {} updated", student.student_number);
    Ok(Json(student))
}

/// Delete a student record together with its attendance
pub async fn delete_student(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let mut uow = UnitOfWork::begin(&state.db_pool).await?;
    if !uow.students().delete(id).await? {
        return Err(ApiError::NotFound);
    }
    uow.commit().await?;

    Ok(Json(Notice::new("Student deleted.")))
}

/// Student accounts that can still be linked to this student
pub async fn assignable_users(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let mut uow = UnitOfWork::begin(&state.db_pool).await?;
    let student = uow.students().find_by_id(id).await?.ok_or(ApiError::NotFound)?;
    let users = uow.users().list_unlinked_students().await?;

    let users: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();
    Ok(Json(json!({
        "student": student,
        "users": users,
    })))
}

/// Link a student account to this student record
///
/// A student record has at most one account and an account at most one
/// student record. Linking the same pair again changes nothing.
pub async fn assign_user(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
    WithRejection(Json(payload), _): WithRejection<Json<AssignUserRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let mut uow = UnitOfWork::begin(&state.db_pool).await?;
    let student = uow.students().find_by_id(id).await?.ok_or(ApiError::NotFound)?;

    let user = uow
        .users()
        .find_by_id(payload.user_id)
        .await?
        .ok_or_else(|| ApiError::Validation("User not found.".to_string()))?;

    if user.role != Role::Student {
        return Err(ApiError::Validation(
            "Only student accounts can be linked to a student record.".to_string(),
        ));
    }

    match user.student_id {
        Some(linked) if linked == student.id => {
            return Ok(Json(json!({
                "message": "User is already assigned to this student.",
                "user": UserResponse::from(&user),
            })));
        }
        Some(_) => {
            return Err(ApiError::Conflict(
                "User is already linked to another student.".to_string(),
            ));
        }
        None => {}
    }

    if let Some(other) = uow.users().find_by_student_id(student.id).await? {
        if other.id != user.id {
            return Err(ApiError::Conflict(
                "Student already has a linked account.".to_string(),
            ));
        }
    }

    let linked = uow
        .users()
        .link_student(user.id, student.id)
        .await
        .map_err(|e| ApiError::from_write(e, "A linked account for this student"))?;
    if !linked {
        return Err(ApiError::Conflict(
            "User is already linked to another student.".to_string(),
        ));
    }
    uow.commit().await?;

    info!("Linked {} to student {}", user.username, student.student_number);

    let mut user = user;
    user.student_id = Some(student.id);
    Ok(Json(json!({
        "message": "User assigned to student.",
        "user": UserResponse::from(&user),
    })))
}
