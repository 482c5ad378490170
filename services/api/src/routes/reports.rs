//! Attendance report

use auth::Identity;
use axum::{
    Extension, Json,
    extract::State,
    response::IntoResponse,
};

use crate::{
    error::{ApiError, ApiResult, NOT_LINKED_NOTICE},
    models::Report,
    report::{aggregate_view, student_view},
    state::AppState,
    unit_of_work::UnitOfWork,
};

/// Presence percentages: the student's own, or every student by course for staff
pub async fn report(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<impl IntoResponse> {
    let mut uow = UnitOfWork::begin(&state.db_pool).await?;

    let report = if identity.role.is_staff() {
        Report::Aggregate(aggregate_view(&mut uow).await?)
    } else {
        let student_id = identity
            .linked_student()
            .ok_or(ApiError::Forbidden(NOT_LINKED_NOTICE))?;
        Report::Student(student_view(&mut uow, student_id).await?)
    };

    Ok(Json(report))
}
