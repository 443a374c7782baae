mod dto;
mod handlers;
mod repo;

pub use repo::{
    NewRegistration, PgRegistrationRepo, Registration, RegistrationPatch, RegistrationRepo,
};

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::registration_routes()
}
