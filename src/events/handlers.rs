use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use super::{
    dto::{event_patch, new_event},
    repo::Event,
};
use crate::{
    error::{AppError, AppResult},
    response::ApiResponse,
    state::AppState,
    uploads::{discard_image, upload_image, MultipartForm},
    validation::parse_id,
};

const IMAGE_FOLDER: &str = "events";

pub fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/:id", get(get_event).put(update_event).delete(delete_event))
}

#[instrument(skip(state))]
pub async fn list_events(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<Event>>>> {
    Ok(Json(ApiResponse::data(state.events.list().await?)))
}

#[instrument(skip(state))]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Event>>> {
    let id = parse_id(&id)?;
    let event = state
        .events
        .find(id)
        .await?
        .ok_or_else(|| AppError::not_found("Event"))?;
    Ok(Json(ApiResponse::data(event)))
}

#[instrument(skip(state, form))]
pub async fn create_event(
    State(state): State<AppState>,
    mut form: MultipartForm,
) -> AppResult<(StatusCode, Json<ApiResponse<Event>>)> {
    let mut new = new_event(&form)?;
    if let Some(image) = form.take_image() {
        new.image_url = Some(upload_image(state.storage.as_ref(), IMAGE_FOLDER, image).await?);
    }

    let uploaded = new.image_url.clone();
    let event = match state.events.insert(new).await {
        Ok(ev) => ev,
        Err(e) => {
            if let Some(url) = uploaded {
                discard_image(state.storage.as_ref(), &url).await;
            }
            return Err(e.into());
        }
    };

    info!(event_id = %event.id, title = %event.title, "event created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(event).with_message("Event created successfully")),
    ))
}

#[instrument(skip(state, form))]
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut form: MultipartForm,
) -> AppResult<Json<ApiResponse<Event>>> {
    let id = parse_id(&id)?;
    let mut patch = event_patch(&form)?;
    let existing = state
        .events
        .find(id)
        .await?
        .ok_or_else(|| AppError::not_found("Event"))?;

    if let Some(image) = form.take_image() {
        patch.image_url = Some(upload_image(state.storage.as_ref(), IMAGE_FOLDER, image).await?);
    }
    let uploaded = patch.image_url.clone();

    let event = match state.events.update(id, patch).await {
        Ok(Some(ev)) => ev,
        outcome => {
            if let Some(url) = uploaded.as_deref() {
                discard_image(state.storage.as_ref(), url).await;
            }
            return Err(match outcome {
                Err(e) => e.into(),
                Ok(_) => AppError::not_found("Event"),
            });
        }
    };

    if uploaded.is_some() {
        if let Some(old) = existing.image_url.as_deref() {
            discard_image(state.storage.as_ref(), old).await;
        }
    }

    info!(event_id = %event.id, "event updated");
    Ok(Json(
        ApiResponse::data(event).with_message("Event updated successfully"),
    ))
}

#[instrument(skip(state))]
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = parse_id(&id)?;
    let event = state
        .events
        .delete(id)
        .await?
        .ok_or_else(|| AppError::not_found("Event"))?;

    if let Some(url) = event.image_url.as_deref() {
        discard_image(state.storage.as_ref(), url).await;
    }

    info!(event_id = %event.id, "event deleted");
    Ok(Json(ApiResponse::message("Event deleted successfully")))
}
