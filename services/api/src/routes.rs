//! API service routes

use axum::{
    Json, Router,
    extract::State,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;

use crate::{
    middleware::{require_staff, session_middleware},
    state::AppState,
};

mod account;
mod attendance;
mod courses;
mod dashboard;
mod reports;
mod students;

/// Create the router for the API service
///
/// Three layers of access: public routes, routes for any logged-in account,
/// and staff routes that additionally require the professor or admin role.
pub fn create_router(state: AppState) -> Router {
    let staff_routes = Router::new()
        .route("/courses", get(courses::list_courses))
        .route("/courses/add", post(courses::add_course))
        .route("/courses/:id", get(courses::get_course))
        .route("/courses/:id/edit", post(courses::edit_course))
        .route("/courses/:id/delete", post(courses::delete_course))
        .route("/students", get(students::list_students))
        .route("/students/add", post(students::add_student))
        .route("/students/:id", get(students::get_student))
        .route("/students/:id/edit", post(students::edit_student))
        .route("/students/:id/delete", post(students::delete_student))
        .route(
            "/students/:id/assign_user",
            get(students::assignable_users).post(students::assign_user),
        )
        .route("/attendance/add", post(attendance::add_attendance))
        .route("/attendance/:id", get(attendance::get_attendance))
        .route("/attendance/:id/edit", post(attendance::edit_attendance))
        .route("/attendance/:id/delete", post(attendance::delete_attendance))
        .route_layer(middleware::from_fn(require_staff));

    let member_routes = Router::new()
        .route("/logout", get(account::logout))
        .route("/dashboard", get(dashboard::dashboard))
        .route("/attendance", get(attendance::list_attendance))
        .route("/report", get(reports::report))
        .merge(staff_routes)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/login", post(account::login))
        .route(
            "/register",
            get(account::registration_options).post(account::register),
        )
        .merge(member_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = common::health_check(&state.db_pool).await.unwrap_or(false);

    Json(json!({
        "status": if database { "ok" } else { "degraded" },
        "service": "attendify",
        "database": database,
    }))
}
