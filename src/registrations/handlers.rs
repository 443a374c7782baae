use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use super::{
    dto::{RegistrationFilter, RegistrationRequest},
    repo::Registration,
};
use crate::{
    error::{AppError, AppJson, AppQuery, AppResult},
    response::ApiResponse,
    state::AppState,
    validation::parse_id,
};

pub fn registration_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_registrations).post(create_registration))
        .route(
            "/:id",
            get(get_registration)
                .put(update_registration)
                .delete(delete_registration),
        )
}

#[instrument(skip(state))]
pub async fn list_registrations(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<RegistrationFilter>,
) -> AppResult<Json<ApiResponse<Vec<Registration>>>> {
    let regs = state.registrations.list(filter.event_id()?).await?;
    Ok(Json(ApiResponse::data(regs)))
}

#[instrument(skip(state))]
pub async fn get_registration(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Registration>>> {
    let reg = state
        .registrations
        .find(parse_id(&id)?)
        .await?
        .ok_or_else(|| AppError::not_found("Registration"))?;
    Ok(Json(ApiResponse::data(reg)))
}

#[instrument(skip(state, payload))]
pub async fn create_registration(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegistrationRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Registration>>)> {
    let new = payload.validate()?;
    let reg = state.registrations.insert(new).await?;
    info!(registration_id = %reg.id, event_id = ?reg.event_id, "registration created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(reg).with_message("Registration successful")),
    ))
}

#[instrument(skip(state, payload))]
pub async fn update_registration(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<RegistrationRequest>,
) -> AppResult<Json<ApiResponse<Registration>>> {
    let id = parse_id(&id)?;
    let patch = payload.into_patch()?;
    let reg = state
        .registrations
        .update(id, patch)
        .await?
        .ok_or_else(|| AppError::not_found("Registration"))?;
    info!(registration_id = %reg.id, "registration updated");
    Ok(Json(ApiResponse::data(reg)))
}

#[instrument(skip(state))]
pub async fn delete_registration(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = parse_id(&id)?;
    if !state.registrations.delete(id).await? {
        return Err(AppError::not_found("Registration"));
    }
    info!(registration_id = %id, "registration deleted");
    Ok(Json(ApiResponse::message("Registration deleted successfully")))
}
