use super::repo::{EventPatch, NewEvent};
use crate::{error::AppResult, uploads::MultipartForm, validation};

/// Text fields of the create form. The image is uploaded separately.
pub fn new_event(form: &MultipartForm) -> AppResult<NewEvent> {
    let title = validation::required(form.text("title"), "title")?;
    let description = validation::required(form.text("description"), "description")?;
    let date = validation::required(form.text("date"), "date")?;
    Ok(NewEvent {
        title,
        description,
        date: validation::parse_date(&date, "date")?,
        location: validation::optional(form.text("location")),
        image_url: None,
    })
}

pub fn event_patch(form: &MultipartForm) -> AppResult<EventPatch> {
    let date = validation::optional(form.text("date"))
        .map(|d| validation::parse_date(&d, "date"))
        .transpose()?;
    Ok(EventPatch {
        title: validation::optional(form.text("title")),
        description: validation::optional(form.text("description")),
        date,
        location: validation::optional(form.text("location")),
        image_url: None,
    })
}
