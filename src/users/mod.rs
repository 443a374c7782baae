mod dto;
mod handlers;
mod repo;

pub use repo::{NewUser, PgUserRepo, User, UserRepo, UserRole};

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::user_routes()
}
