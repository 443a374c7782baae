use serde::Deserialize;
use uuid::Uuid;

use super::repo::{NewRegistration, RegistrationPatch};
use crate::{
    error::{AppError, AppResult},
    validation,
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub event_id: Option<String>,
    pub city: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationFilter {
    pub event_id: Option<String>,
}

impl RegistrationFilter {
    pub fn event_id(&self) -> AppResult<Option<Uuid>> {
        parse_event_id(self.event_id.as_deref())
    }
}

fn parse_event_id(raw: Option<&str>) -> AppResult<Option<Uuid>> {
    validation::optional(raw)
        .map(|id| Uuid::parse_str(&id).map_err(|_| AppError::validation("invalid eventId")))
        .transpose()
}

fn phone(raw: &str) -> AppResult<String> {
    let digits = raw.chars().filter(|c| c.is_ascii_digit()).count();
    if !(7..=15).contains(&digits) {
        return Err(AppError::validation("Invalid phone number"));
    }
    Ok(raw.to_string())
}

impl RegistrationRequest {
    pub fn validate(self) -> AppResult<NewRegistration> {
        let raw_phone = validation::required(self.phone.as_deref(), "phone")?;
        Ok(NewRegistration {
            name: validation::required(self.name.as_deref(), "name")?,
            email: validation::email(self.email.as_deref())?,
            phone: phone(&raw_phone)?,
            event_id: parse_event_id(self.event_id.as_deref())?,
            city: validation::optional(self.city.as_deref()),
            notes: validation::optional(self.notes.as_deref()),
        })
    }

    pub fn into_patch(self) -> AppResult<RegistrationPatch> {
        let email = match validation::optional(self.email.as_deref()) {
            Some(e) => Some(validation::email(Some(&e))?),
            None => None,
        };
        let phone = validation::optional(self.phone.as_deref())
            .map(|p| phone(&p))
            .transpose()?;
        Ok(RegistrationPatch {
            name: validation::optional(self.name.as_deref()),
            email,
            phone,
            event_id: parse_event_id(self.event_id.as_deref())?,
            city: validation::optional(self.city.as_deref()),
            notes: validation::optional(self.notes.as_deref()),
        })
    }
}
