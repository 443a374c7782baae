use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::{info, instrument};

use super::{dto::ContactRequest, repo::ContactMessage};
use crate::{
    error::{AppJson, AppResult},
    response::ApiResponse,
    state::AppState,
};

pub fn contact_routes() -> Router<AppState> {
    Router::new().route("/", post(submit_message).get(list_messages))
}

#[instrument(skip(state, payload))]
pub async fn submit_message(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ContactRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ContactMessage>>)> {
    let new = payload.validate()?;
    let msg = state.contacts.insert(new).await?;
    info!(id = %msg.id, email = %msg.email, "contact message stored");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(msg).with_message("Message sent successfully")),
    ))
}

#[instrument(skip(state))]
pub async fn list_messages(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<ContactMessage>>>> {
    let msgs = state.contacts.list().await?;
    Ok(Json(ApiResponse::data(msgs)))
}
