use async_trait::async_trait;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Informational link to an event; not checked against `events`.
    pub event_id: Option<Uuid>,
    pub city: Option<String>,
    pub notes: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub event_id: Option<Uuid>,
    pub city: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RegistrationPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub event_id: Option<Uuid>,
    pub city: Option<String>,
    pub notes: Option<String>,
}

#[async_trait]
pub trait RegistrationRepo: Send + Sync {
    async fn insert(&self, new: NewRegistration) -> anyhow::Result<Registration>;
    async fn list(&self, event_id: Option<Uuid>) -> anyhow::Result<Vec<Registration>>;
    async fn find(&self, id: Uuid) -> anyhow::Result<Option<Registration>>;
    async fn update(
        &self,
        id: Uuid,
        patch: RegistrationPatch,
    ) -> anyhow::Result<Option<Registration>>;
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}

pub struct PgRegistrationRepo {
    db: PgPool,
}

impl PgRegistrationRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RegistrationRepo for PgRegistrationRepo {
    async fn insert(&self, new: NewRegistration) -> anyhow::Result<Registration> {
        let reg = sqlx::query_as::<_, Registration>(
            r#"
            INSERT INTO registrations (id, name, email, phone, event_id, city, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, email, phone, event_id, city, notes, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.name)
        .bind(new.email)
        .bind(new.phone)
        .bind(new.event_id)
        .bind(new.city)
        .bind(new.notes)
        .fetch_one(&self.db)
        .await?;
        Ok(reg)
    }

    async fn list(&self, event_id: Option<Uuid>) -> anyhow::Result<Vec<Registration>> {
        let rows = sqlx::query_as::<_, Registration>(
            r#"
            SELECT id, name, email, phone, event_id, city, notes, created_at, updated_at
            FROM registrations
            WHERE $1::uuid IS NULL OR event_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn find(&self, id: Uuid) -> anyhow::Result<Option<Registration>> {
        let reg = sqlx::query_as::<_, Registration>(
            r#"
            SELECT id, name, email, phone, event_id, city, notes, created_at, updated_at
            FROM registrations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(reg)
    }

    async fn update(
        &self,
        id: Uuid,
        patch: RegistrationPatch,
    ) -> anyhow::Result<Option<Registration>> {
        let reg = sqlx::query_as::<_, Registration>(
            r#"
            UPDATE registrations
               SET name = COALESCE($2, name),
                   email = COALESCE($3, email),
                   phone = COALESCE($4, phone),
                   event_id = COALESCE($5, event_id),
                   city = COALESCE($6, city),
                   notes = COALESCE($7, notes),
                   updated_at = now()
             WHERE id = $1
            RETURNING id, name, email, phone, event_id, city, notes, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.email)
        .bind(patch.phone)
        .bind(patch.event_id)
        .bind(patch.city)
        .bind(patch.notes)
        .fetch_optional(&self.db)
        .await?;
        Ok(reg)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM registrations WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(res.rows_affected() == 1)
    }
}
