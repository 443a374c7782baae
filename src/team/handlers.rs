use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use super::{
    dto::{member_patch, new_member},
    repo::TeamMember,
};
use crate::{
    error::{AppError, AppResult},
    response::ApiResponse,
    state::AppState,
    uploads::{discard_image, upload_image, MultipartForm},
    validation::parse_id,
};

const IMAGE_FOLDER: &str = "team";

pub fn team_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_members).post(create_member))
        .route("/:id", get(get_member).put(update_member).delete(delete_member))
}

#[instrument(skip(state))]
pub async fn list_members(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<TeamMember>>>> {
    Ok(Json(ApiResponse::data(state.team.list().await?)))
}

#[instrument(skip(state))]
pub async fn get_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<TeamMember>>> {
    let member = state
        .team
        .find(parse_id(&id)?)
        .await?
        .ok_or_else(|| AppError::not_found("Team member"))?;
    Ok(Json(ApiResponse::data(member)))
}

#[instrument(skip(state, form))]
pub async fn create_member(
    State(state): State<AppState>,
    mut form: MultipartForm,
) -> AppResult<(StatusCode, Json<ApiResponse<TeamMember>>)> {
    let mut new = new_member(&form)?;
    if let Some(image) = form.take_image() {
        new.image_url = Some(upload_image(state.storage.as_ref(), IMAGE_FOLDER, image).await?);
    }

    let uploaded = new.image_url.clone();
    let member = match state.team.insert(new).await {
        Ok(m) => m,
        Err(e) => {
            if let Some(url) = uploaded {
                discard_image(state.storage.as_ref(), &url).await;
            }
            return Err(e.into());
        }
    };

    info!(member_id = %member.id, name = %member.name, "team member created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(member).with_message("Team member added successfully")),
    ))
}

#[instrument(skip(state, form))]
pub async fn update_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut form: MultipartForm,
) -> AppResult<Json<ApiResponse<TeamMember>>> {
    let id = parse_id(&id)?;
    let mut patch = member_patch(&form)?;
    let existing = state
        .team
        .find(id)
        .await?
        .ok_or_else(|| AppError::not_found("Team member"))?;

    if let Some(image) = form.take_image() {
        patch.image_url = Some(upload_image(state.storage.as_ref(), IMAGE_FOLDER, image).await?);
    }
    let uploaded = patch.image_url.clone();

    let member = match state.team.update(id, patch).await {
        Ok(Some(m)) => m,
        outcome => {
            if let Some(url) = uploaded.as_deref() {
                discard_image(state.storage.as_ref(), url).await;
            }
            return Err(match outcome {
                Err(e) => e.into(),
                Ok(_) => AppError::not_found("Team member"),
            });
        }
    };

    if uploaded.is_some() {
        if let Some(old) = existing.image_url.as_deref() {
            discard_image(state.storage.as_ref(), old).await;
        }
    }

    info!(member_id = %member.id, "team member updated");
    Ok(Json(
        ApiResponse::data(member).with_message("Team member updated successfully"),
    ))
}

#[instrument(skip(state))]
pub async fn delete_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let member = state
        .team
        .delete(parse_id(&id)?)
        .await?
        .ok_or_else(|| AppError::not_found("Team member"))?;

    if let Some(url) = member.image_url.as_deref() {
        discard_image(state.storage.as_ref(), url).await;
    }

    info!(member_id = %member.id, "team member deleted");
    Ok(Json(ApiResponse::message("Team member deleted successfully")))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::http::StatusCode;
    use uuid::Uuid;

    use crate::{
        team::{NewTeamMember, TeamMember, TeamMemberPatch, TeamRepo},
        testing::{empty_request, multipart_request, MemoryCollection, TestApp, MEDIA_BASE},
    };

    /// Member store where the row disappears between lookup and update.
    #[derive(Default)]
    struct VanishingMembers(MemoryCollection<TeamMember>);

    #[async_trait]
    impl TeamRepo for VanishingMembers {
        async fn insert(&self, new: NewTeamMember) -> anyhow::Result<TeamMember> {
            TeamRepo::insert(&self.0, new).await
        }
        async fn list(&self) -> anyhow::Result<Vec<TeamMember>> {
            TeamRepo::list(&self.0).await
        }
        async fn find(&self, id: Uuid) -> anyhow::Result<Option<TeamMember>> {
            TeamRepo::find(&self.0, id).await
        }
        async fn update(&self, id: Uuid, _patch: TeamMemberPatch) -> anyhow::Result<Option<TeamMember>> {
            TeamRepo::delete(&self.0, id).await?;
            Ok(None)
        }
        async fn delete(&self, id: Uuid) -> anyhow::Result<Option<TeamMember>> {
            TeamRepo::delete(&self.0, id).await
        }
    }

    #[tokio::test]
    async fn members_are_listed_by_position() {
        let t = TestApp::new();
        for (name, role, pos) in [
            ("Veeresh", "Treasurer", "2"),
            ("Sharanamma", "President", "0"),
            ("Nagaraj", "Secretary", "1"),
        ] {
            let (status, _, _) = t
                .send(multipart_request(
                    "POST",
                    "/team",
                    &[("name", name), ("role", role), ("position", pos)],
                    None,
                ))
                .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (_, _, list) = t.send(empty_request("GET", "/team")).await;
        let names: Vec<_> = list["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["Sharanamma", "Nagaraj", "Veeresh"]);
    }

    #[tokio::test]
    async fn portrait_is_uploaded_to_team_folder() {
        let t = TestApp::new();
        let (status, _, body) = t
            .send(multipart_request(
                "POST",
                "/team",
                &[("name", "Sharanamma"), ("role", "President")],
                Some(("image/webp", b"RIFF....WEBP".as_slice())),
            ))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        let url = body["data"]["imageUrl"].as_str().unwrap();
        assert!(url.starts_with(&format!("{MEDIA_BASE}/team/")));
        assert!(url.ends_with(".webp"));
    }

    #[tokio::test]
    async fn unsupported_image_type_is_rejected() {
        let t = TestApp::new();
        let (status, _, body) = t
            .send(multipart_request(
                "POST",
                "/team",
                &[("name", "Sharanamma"), ("role", "President")],
                Some(("text/plain", b"hello".as_slice())),
            ))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "unsupported image type text/plain");
        assert!(t.storage.keys().is_empty());
    }

    #[tokio::test]
    async fn update_and_delete_member() {
        let t = TestApp::new();
        let (_, _, created) = t
            .send(multipart_request(
                "POST",
                "/team",
                &[("name", "Nagaraj"), ("role", "Secretary")],
                None,
            ))
            .await;
        let id = created["data"]["id"].as_str().unwrap();

        let (status, _, updated) = t
            .send(multipart_request(
                "PUT",
                &format!("/team/{id}"),
                &[("role", "Joint Secretary"), ("bio", "Volunteer since 2012")],
                None,
            ))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["data"]["name"], "Nagaraj");
        assert_eq!(updated["data"]["role"], "Joint Secretary");
        assert_eq!(updated["data"]["bio"], "Volunteer since 2012");

        let (status, _, _) = t.send(empty_request("DELETE", &format!("/team/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _, body) = t.send(empty_request("DELETE", &format!("/team/{id}"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Team member not found");
    }

    #[tokio::test]
    async fn portrait_is_discarded_when_member_vanishes_mid_update() {
        let t = TestApp::new().map_state(|s| s.team = Arc::new(VanishingMembers::default()));
        let (_, _, created) = t
            .send(multipart_request(
                "POST",
                "/team",
                &[("name", "Nagaraj"), ("role", "Secretary")],
                None,
            ))
            .await;
        let id = created["data"]["id"].as_str().unwrap();

        let (status, _, body) = t
            .send(multipart_request(
                "PUT",
                &format!("/team/{id}"),
                &[("role", "Joint Secretary")],
                Some(("image/png", b"png-bytes".as_slice())),
            ))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Team member not found");
        assert!(t.storage.keys().is_empty());
    }

    #[tokio::test]
    async fn get_unknown_member_is_404() {
        let t = TestApp::new();
        let (status, _, _) = t
            .send(empty_request("GET", &format!("/team/{}", Uuid::new_v4())))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
