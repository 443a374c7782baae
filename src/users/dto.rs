use serde::{Deserialize, Serialize};

use super::repo::User;
use crate::{auth::password, error::AppResult, validation};

#[derive(Debug, Default, Deserialize)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Validated signup fields; the password is still plain text here.
pub struct ValidSignup {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SignupRequest {
    pub fn validate(self) -> AppResult<ValidSignup> {
        let name = validation::required(self.name.as_deref(), "name")?;
        let email = validation::email(self.email.as_deref())?;
        let password = self.password.unwrap_or_default();
        password::check_strength(&password)?;
        Ok(ValidSignup {
            name,
            email,
            password,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn validate(self) -> AppResult<(String, String)> {
        let email = validation::email(self.email.as_deref())?;
        let password = validation::required(self.password.as_deref(), "password")?;
        Ok((email, password))
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}
