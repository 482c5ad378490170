//! Landing page after login

use auth::Identity;
use axum::{
    Extension, Json,
    extract::State,
    response::IntoResponse,
};

use crate::{
    error::{ApiResult, NOT_LINKED_NOTICE},
    models::Dashboard,
    state::AppState,
    unit_of_work::UnitOfWork,
};

/// Entries shown in the staff "recent attendance" panel
const RECENT_ATTENDANCE: i64 = 6;

/// Students see their own record; staff see totals and recent entries
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<impl IntoResponse> {
    let mut uow = UnitOfWork::begin(&state.db_pool).await?;

    let view = if identity.role.is_staff() {
        Dashboard::Staff {
            total_students: uow.students().count().await?,
            total_attendance: uow.attendance().count().await?,
            recent: uow.attendance().recent(RECENT_ATTENDANCE).await?,
        }
    } else {
        let student = match identity.linked_student() {
            Some(student_id) => uow.students().find_by_id(student_id).await?,
            None => None,
        };

        match student {
            Some(student) => {
                let attendance = uow.attendance().list_for_student(student.id).await?;
                Dashboard::Student {
                    student: Some(student),
                    attendance,
                    notice: None,
                }
            }
            None => Dashboard::Student {
                student: None,
                attendance: Vec::new(),
                notice: Some(NOT_LINKED_NOTICE),
            },
        }
    };

    Ok(Json(view))
}
