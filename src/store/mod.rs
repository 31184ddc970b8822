use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Event;
use crate::utils::error::AppError;

/// Persistence layer for event records.
///
/// Every operation is a single SQL statement, so simultaneous organizer
/// edits resolve as last-write-wins under PostgreSQL statement atomicity.
#[derive(Clone)]
pub struct EventStore {
    pool: PgPool,
}

impl EventStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        title: &str,
        content: &str,
        is_public: bool,
    ) -> Result<Event, AppError> {
        let now = Utc::now();
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (id, title, content, is_public, view_count, created_at, updated_at)
            VALUES ($1, $2, $3, $4, 0, $5, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(title)
        .bind(content)
        .bind(is_public)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Organizer-side lookup; returns the record whether or not it is public.
    pub async fn get(&self, id: Uuid) -> Result<Event, AppError> {
        let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event with id '{}' was not found", id)))?;

        Ok(event)
    }

    pub async fn update(
        &self,
        id: Uuid,
        title: &str,
        content: &str,
        is_public: Option<bool>,
    ) -> Result<Event, AppError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET title = $2, content = $3, is_public = COALESCE($4, is_public), updated_at = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(content)
        .bind(is_public)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Event with id '{}' was not found", id)))?;

        Ok(event)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = sqlx::query_scalar::<_, Uuid>("DELETE FROM events WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match deleted {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!(
                "Event with id '{}' was not found",
                id
            ))),
        }
    }

    /// Most recently updated first, the order an organizer's editor shows.
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Event>, AppError> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT * FROM events ORDER BY updated_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Visitor-side lookup: bumps the view counter and returns the record,
    /// but only for public events. A private event is indistinguishable from
    /// a missing one. The increment happens in SQL and never touches
    /// `updated_at`.
    pub async fn record_view(&self, id: Uuid) -> Result<Event, AppError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET view_count = view_count + 1
            WHERE id = $1 AND is_public = TRUE
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Event with id '{}' was not found", id)))?;

        Ok(event)
    }
}
