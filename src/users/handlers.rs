use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::{
    dto::{AuthResponse, LoginRequest, SignupRequest},
    repo::{NewUser, User, UserRole},
};
use crate::{
    auth::{password, AuthUser, JwtKeys},
    error::{AppError, AppJson, AppResult},
    response::ApiResponse,
    state::AppState,
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/me", get(me))
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid credentials".into())
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<AuthResponse>>)> {
    let valid = payload.validate()?;
    let password_hash = password::hash_password(&valid.password)?;

    // Accounts created here are never admins.
    let user = state
        .users
        .insert(NewUser {
            name: valid.name,
            email: valid.email.clone(),
            password_hash,
            role: UserRole::User,
        })
        .await?
        .ok_or_else(|| {
            warn!(email = %valid.email, "email already registered");
            AppError::Conflict("Email already registered".into())
        })?;

    let token = JwtKeys::from_ref(&state).sign(user.id, user.role)?;
    info!(user_id = %user.id, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(AuthResponse { token, user }).with_message("Signup successful")),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<AuthResponse>>> {
    let (email, plain) = payload.validate()?;

    let Some(user) = state.users.find_by_email(&email).await? else {
        warn!(%email, "login for unknown email");
        return Err(invalid_credentials());
    };
    if !password::verify_password(&plain, &user.password_hash)? {
        warn!(user_id = %user.id, "login with wrong password");
        return Err(invalid_credentials());
    }

    let token = JwtKeys::from_ref(&state).sign(user.id, user.role)?;
    info!(user_id = %user.id, "user logged in");
    Ok(Json(
        ApiResponse::data(AuthResponse { token, user }).with_message("Login successful"),
    ))
}

#[instrument(skip(state))]
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<ApiResponse<User>>> {
    let user = state
        .users
        .find_by_id(auth.id)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;
    Ok(Json(ApiResponse::data(user)))
}
