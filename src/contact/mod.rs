mod dto;
mod handlers;
mod repo;

pub use repo::{ContactMessage, ContactRepo, NewContactMessage, PgContactRepo};

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::contact_routes()
}
