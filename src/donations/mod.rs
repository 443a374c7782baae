mod dto;
mod handlers;
pub mod payments;
mod repo;

pub use repo::{Donation, DonationRepo, DonationStatus, NewDonation, PgDonationRepo};

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::donation_routes()
}
