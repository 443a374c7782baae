pub mod app;
pub mod auth;
pub mod config;
pub mod contact;
pub mod cors;
pub mod db;
pub mod donations;
pub mod error;
pub mod events;
pub mod health;
pub mod nav;
pub mod registrations;
pub mod response;
pub mod state;
pub mod storage;
pub mod team;
pub mod uploads;
pub mod users;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;
