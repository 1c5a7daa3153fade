use axum::response::Json;

use crate::auth::{self, Claims};
use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::models::{LoginRequest, RegisterRequest, Role, TokenResponse, UserRecord};
use crate::store;

/// POST /api/auth/register - create a user account
pub async fn register(Json(req): Json<RegisterRequest>) -> Result<Json<UserRecord>, ApiError> {
    if store::users::find_by_email(&req.email).await?.is_some() {
        return Err(ApiError::bad_request("Email already registered"));
    }

    let role = req.role.unwrap_or(Role::Customer);
    let hashed = auth::hash_password(&req.password)?;

    let user = store::users::create(&req.email, &req.name, &hashed, role).await?;
    Ok(Json(user.into_record()))
}

/// POST /api/auth/login - verify credentials and issue a bearer token
pub async fn login(Json(req): Json<LoginRequest>) -> Result<Json<TokenResponse>, ApiError> {
    let user = match store::users::find_by_email(&req.email).await? {
        Some(user) if auth::verify_password(&req.password, &user.hashed_password) => user,
        _ => return Err(ApiError::unauthorized("Incorrect email or password")),
    };

    if !user.is_active {
        return Err(ApiError::bad_request("Inactive user"));
    }

    let token = auth::generate_jwt(Claims::new(user.email))?;
    Ok(Json(TokenResponse::bearer(token)))
}

/// GET /api/auth/me - the caller's own profile
pub async fn me(user: CurrentUser) -> Json<UserRecord> {
    Json(user.to_record())
}
