use super::repo::{NewTeamMember, TeamMemberPatch};
use crate::{
    error::{AppError, AppResult},
    uploads::MultipartForm,
    validation,
};

fn position(form: &MultipartForm) -> AppResult<Option<i32>> {
    validation::optional(form.text("position"))
        .map(|p| {
            p.parse::<i32>()
                .map_err(|_| AppError::validation("position must be a whole number"))
        })
        .transpose()
}

pub fn new_member(form: &MultipartForm) -> AppResult<NewTeamMember> {
    Ok(NewTeamMember {
        name: validation::required(form.text("name"), "name")?,
        role: validation::required(form.text("role"), "role")?,
        bio: validation::optional(form.text("bio")),
        image_url: None,
        position: position(form)?.unwrap_or(0),
    })
}

pub fn member_patch(form: &MultipartForm) -> AppResult<TeamMemberPatch> {
    Ok(TeamMemberPatch {
        name: validation::optional(form.text("name")),
        role: validation::optional(form.text("role")),
        bio: validation::optional(form.text("bio")),
        image_url: None,
        position: position(form)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_defaults_to_zero_and_must_be_numeric() {
        let form = MultipartForm::from_parts(&[("name", "Girija"), ("role", "Secretary")], None);
        assert_eq!(new_member(&form).unwrap().position, 0);

        let form = MultipartForm::from_parts(
            &[("name", "Girija"), ("role", "Secretary"), ("position", "first")],
            None,
        );
        assert_eq!(
            new_member(&form).unwrap_err().to_string(),
            "position must be a whole number"
        );
    }

    #[test]
    fn role_is_required() {
        let form = MultipartForm::from_parts(&[("name", "Girija")], None);
        assert_eq!(new_member(&form).unwrap_err().to_string(), "role is required");
    }
}
