mod dto;
mod handlers;
mod repo;

pub use repo::{Event, EventPatch, EventRepo, NewEvent, PgEventRepo};

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::event_routes()
}
