use async_trait::async_trait;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub location: Option<String>,
    /// Public URL in the media store.
    pub image_url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub date: OffsetDateTime,
    pub location: Option<String>,
    pub image_url: Option<String>,
}

/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<OffsetDateTime>,
    pub location: Option<String>,
    pub image_url: Option<String>,
}

#[async_trait]
pub trait EventRepo: Send + Sync {
    async fn insert(&self, new: NewEvent) -> anyhow::Result<Event>;
    async fn list(&self) -> anyhow::Result<Vec<Event>>;
    async fn find(&self, id: Uuid) -> anyhow::Result<Option<Event>>;
    async fn update(&self, id: Uuid, patch: EventPatch) -> anyhow::Result<Option<Event>>;
    /// Returns the removed event so its image can be cleaned up.
    async fn delete(&self, id: Uuid) -> anyhow::Result<Option<Event>>;
}

pub struct PgEventRepo {
    db: PgPool,
}

impl PgEventRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EventRepo for PgEventRepo {
    async fn insert(&self, new: NewEvent) -> anyhow::Result<Event> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (id, title, description, date, location, image_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, description, date, location, image_url, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.title)
        .bind(new.description)
        .bind(new.date)
        .bind(new.location)
        .bind(new.image_url)
        .fetch_one(&self.db)
        .await?;
        Ok(event)
    }

    async fn list(&self) -> anyhow::Result<Vec<Event>> {
        let rows = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, title, description, date, location, image_url, created_at, updated_at
            FROM events
            ORDER BY date ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn find(&self, id: Uuid) -> anyhow::Result<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, title, description, date, location, image_url, created_at, updated_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(event)
    }

    async fn update(&self, id: Uuid, patch: EventPatch) -> anyhow::Result<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
               SET title = COALESCE($2, title),
                   description = COALESCE($3, description),
                   date = COALESCE($4, date),
                   location = COALESCE($5, location),
                   image_url = COALESCE($6, image_url),
                   updated_at = now()
             WHERE id = $1
            RETURNING id, title, description, date, location, image_url, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(patch.title)
        .bind(patch.description)
        .bind(patch.date)
        .bind(patch.location)
        .bind(patch.image_url)
        .fetch_optional(&self.db)
        .await?;
        Ok(event)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            DELETE FROM events
             WHERE id = $1
            RETURNING id, title, description, date, location, image_url, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(event)
    }
}

#[cfg(test)]
mod memory {
    use super::*;
    use crate::testing::MemoryCollection;

    #[async_trait]
    impl EventRepo for MemoryCollection<Event> {
        async fn insert(&self, new: NewEvent) -> anyhow::Result<Event> {
            let now = OffsetDateTime::now_utc();
            let event = Event {
                id: Uuid::new_v4(),
                title: new.title,
                description: new.description,
                date: new.date,
                location: new.location,
                image_url: new.image_url,
                created_at: now,
                updated_at: now,
            };
            self.push(event.clone());
            Ok(event)
        }

        async fn list(&self) -> anyhow::Result<Vec<Event>> {
            let mut all = self.all();
            all.sort_by_key(|e| e.date);
            Ok(all)
        }

        async fn find(&self, id: Uuid) -> anyhow::Result<Option<Event>> {
            Ok(MemoryCollection::find(self, |e| e.id == id))
        }

        async fn update(&self, id: Uuid, patch: EventPatch) -> anyhow::Result<Option<Event>> {
            Ok(MemoryCollection::update(
                self,
                |e| e.id == id,
                |e| {
                    if let Some(v) = patch.title {
                        e.title = v;
                    }
                    if let Some(v) = patch.description {
                        e.description = v;
                    }
                    if let Some(v) = patch.date {
                        e.date = v;
                    }
                    if patch.location.is_some() {
                        e.location = patch.location;
                    }
                    if patch.image_url.is_some() {
                        e.image_url = patch.image_url;
                    }
                    e.updated_at = OffsetDateTime::now_utc();
                },
            ))
        }

        async fn delete(&self, id: Uuid) -> anyhow::Result<Option<Event>> {
            Ok(self.remove(|e| e.id == id))
        }
    }
}
