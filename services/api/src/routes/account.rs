//! Login, logout and self-registration

use auth::credential;
use auth::models::{LoginCredentials, NewUser, Role};
use auth::validation;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::{
    WithRejection,
    cookie::{Cookie, CookieJar, SameSite},
};
use serde_json::json;
use tracing::{info, warn};

use crate::{
    error::{ApiError, ApiResult},
    middleware::SESSION_COOKIE,
    models::{LoginResponse, Notice, RegisterRequest, UserResponse},
    state::AppState,
    unit_of_work::UnitOfWork,
};

/// Log in with username and password
///
/// The session token is set as an http-only cookie and also returned in the
/// body for clients that prefer a Bearer header.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(credentials), _): WithRejection<Json<LoginCredentials>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let username = credentials.username.trim();
    if username.is_empty() || credentials.password.is_empty() {
        return Err(ApiError::Validation(
            "Username and password are required".to_string(),
        ));
    }

    let mut uow = UnitOfWork::begin(&state.db_pool).await?;
    let user = uow.users().find_by_username(username).await?;

    let user = match user {
        Some(user) if credential::verify_password(&user.password_hash, &credentials.password) => user,
        _ => {
            warn!("Failed login attempt for {}", username);
            return Err(ApiError::InvalidCredentials);
        }
    };

    let token = state.sessions.issue(&user)?;
    info!("User {} logged in", user.username);

    let cookie = Cookie::build((SESSION_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    let response = LoginResponse {
        user: UserResponse::from(&user),
        token,
        token_type: "Bearer",
        expires_in: state.sessions.ttl_seconds(),
        message: "Logged in successfully.",
    };

    Ok((jar.add(cookie), Json(response)))
}

/// End the session by expiring its cookie
///
/// The expired cookie is sent even when the request authenticated with a
/// Bearer header, so a browser holding a stale cookie drops it too.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let mut expired = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    expired.make_removal();

    (jar.add(expired), Json(Notice::new("You have been logged out.")))
}

/// Roles a visitor may pick when registering
pub async fn registration_options() -> impl IntoResponse {
    let roles: Vec<&str> = Role::SELF_REGISTRABLE.iter().map(Role::as_str).collect();

    Json(json!({
        "roles": roles,
        "default_role": Role::Student.as_str(),
    }))
}

/// Create an account
pub async fn register(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<RegisterRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let username = payload.username.trim();
    validation::validate_username(username).map_err(ApiError::Validation)?;
    validation::validate_password(&payload.password).map_err(ApiError::Validation)?;
    validation::validate_password_confirmation(&payload.password, &payload.confirm)
        .map_err(ApiError::Validation)?;
    let role = validation::validate_registration_role(&payload.role).map_err(ApiError::Validation)?;

    let mut uow = UnitOfWork::begin(&state.db_pool).await?;

    if uow.users().find_by_username(username).await?.is_some() {
        return Err(ApiError::Conflict("Username already exists.".to_string()));
    }

    let new_user = NewUser {
        username: username.to_string(),
        password_hash: credential::hash_password(&payload.password)?,
        role,
        student_id: None,
    };

    let user = uow
        .users()
        .create(&new_user)
        .await
        .map_err(|e| ApiError::from_write(e, "Username"))?;
    uow.commit().await?;

    info!("Registered {} as {}", user.username, user.role);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "user": UserResponse::from(&user),
            "message": "Account created. Please log in.",
        })),
    ))
}
