use serde::Deserialize;

use super::repo::NewContactMessage;
use crate::{error::AppResult, validation};

/// Contact form submission.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl ContactRequest {
    pub fn validate(self) -> AppResult<NewContactMessage> {
        Ok(NewContactMessage {
            name: validation::required(self.name.as_deref(), "name")?,
            email: validation::email(self.email.as_deref())?,
            phone: validation::optional(self.phone.as_deref()),
            subject: validation::optional(self.subject.as_deref()),
            message: validation::required(self.message.as_deref(), "message")?,
        })
    }
}
