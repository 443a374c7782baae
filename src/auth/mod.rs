//! Session tokens and password hashing for site accounts.

mod jwt;
pub mod password;

pub use jwt::{AuthUser, Claims, JwtKeys};
