use async_trait::async_trait;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: Uuid,
    pub name: String,
    /// Designation shown under the portrait.
    pub role: String,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    /// Display order, ascending.
    pub position: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewTeamMember {
    pub name: String,
    pub role: String,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub position: i32,
}

#[derive(Debug, Clone, Default)]
pub struct TeamMemberPatch {
    pub name: Option<String>,
    pub role: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub position: Option<i32>,
}

#[async_trait]
pub trait TeamRepo: Send + Sync {
    async fn insert(&self, new: NewTeamMember) -> anyhow::Result<TeamMember>;
    async fn list(&self) -> anyhow::Result<Vec<TeamMember>>;
    async fn find(&self, id: Uuid) -> anyhow::Result<Option<TeamMember>>;
    async fn update(&self, id: Uuid, patch: TeamMemberPatch) -> anyhow::Result<Option<TeamMember>>;
    async fn delete(&self, id: Uuid) -> anyhow::Result<Option<TeamMember>>;
}

pub struct PgTeamRepo {
    db: PgPool,
}

impl PgTeamRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TeamRepo for PgTeamRepo {
    async fn insert(&self, new: NewTeamMember) -> anyhow::Result<TeamMember> {
        let member = sqlx::query_as::<_, TeamMember>(
            r#"
            INSERT INTO team_members (id, name, role, bio, image_url, position)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, role, bio, image_url, position, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.name)
        .bind(new.role)
        .bind(new.bio)
        .bind(new.image_url)
        .bind(new.position)
        .fetch_one(&self.db)
        .await?;
        Ok(member)
    }

    async fn list(&self) -> anyhow::Result<Vec<TeamMember>> {
        let rows = sqlx::query_as::<_, TeamMember>(
            r#"
            SELECT id, name, role, bio, image_url, position, created_at, updated_at
            FROM team_members
            ORDER BY position ASC, created_at ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn find(&self, id: Uuid) -> anyhow::Result<Option<TeamMember>> {
        let member = sqlx::query_as::<_, TeamMember>(
            r#"
            SELECT id, name, role, bio, image_url, position, created_at, updated_at
            FROM team_members
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(member)
    }

    async fn update(&self, id: Uuid, patch: TeamMemberPatch) -> anyhow::Result<Option<TeamMember>> {
        let member = sqlx::query_as::<_, TeamMember>(
            r#"
            UPDATE team_members
               SET name = COALESCE($2, name),
                   role = COALESCE($3, role),
                   bio = COALESCE($4, bio),
                   image_url = COALESCE($5, image_url),
                   position = COALESCE($6, position),
                   updated_at = now()
             WHERE id = $1
            RETURNING id, name, role, bio, image_url, position, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.role)
        .bind(patch.bio)
        .bind(patch.image_url)
        .bind(patch.position)
        .fetch_optional(&self.db)
        .await?;
        Ok(member)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<Option<TeamMember>> {
        let member = sqlx::query_as::<_, TeamMember>(
            r#"
            DELETE FROM team_members
             WHERE id = $1
            RETURNING id, name, role, bio, image_url, position, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(member)
    }
}
