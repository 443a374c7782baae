mod dto;
mod handlers;
mod repo;

pub use repo::{NewTeamMember, PgTeamRepo, TeamMember, TeamMemberPatch, TeamRepo};

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::team_routes()
}
