//! Session and role middleware
//!
//! [`session_middleware`] resolves the session token to an [`Identity`] and
//! stores it in the request extensions. [`require_staff`] then runs the access
//! policy before any staff handler.

use auth::policy::{self, Authorization, STAFF};
use auth::repositories::UserRepository;
use auth::{Identity, Role};
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::warn;

use crate::error::{ApiError, ApiResult, PERMISSION_NOTICE};
use crate::state::AppState;

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "attendify_session";

/// Extract the session token from the session cookie or a Bearer header
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(cookie) = CookieJar::from_headers(headers).get(SESSION_COOKIE) {
        return Some(cookie.value().to_string());
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

/// Turn the policy outcome into a handler result
pub fn guard(identity: Option<&Identity>, required_roles: &[Role]) -> ApiResult<()> {
    match policy::authorize(identity, required_roles) {
        Authorization::Allowed => Ok(()),
        Authorization::Unauthenticated => Err(ApiError::Unauthenticated),
        Authorization::Forbidden => {
            if let Some(identity) = identity {
                warn!(
                    "Denied {} ({}) access to a staff action",
                    identity.username, identity.role
                );
            }
            Err(ApiError::Forbidden(PERMISSION_NOTICE))
        }
    }
}

/// Authenticate the request from its session token
pub async fn session_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = session_token(req.headers()).ok_or(ApiError::Unauthenticated)?;

    let claims = state.sessions.validate(&token).map_err(|e| {
        warn!("Rejected session token: {}", e);
        ApiError::Unauthenticated
    })?;

    // Re-read the account so role changes and student links apply at once
    let mut conn = state.db_pool.acquire().await?;
    let user = UserRepository::new(&mut *conn)
        .find_by_id(claims.sub)
        .await?
        .ok_or(ApiError::Unauthenticated)?;
    drop(conn);

    req.extensions_mut().insert(Identity::from(&user));

    Ok(next.run(req).await)
}

/// Allow only professors and admins
pub async fn require_staff(req: Request, next: Next) -> Result<Response, ApiError> {
    guard(req.extensions().get::<Identity>(), STAFF)?;
    Ok(next.run(req).await)
}
