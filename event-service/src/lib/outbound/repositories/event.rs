use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::event::errors::EventError;
use crate::domain::event::models::Event;
use crate::domain::event::models::EventId;
use crate::domain::event::models::EventTitle;
use crate::domain::event::models::NewEvent;
use crate::domain::event::ports::EventRepository;
use crate::domain::user::models::UserId;

pub struct PostgresEventRepository {
    pool: PgPool,
}

impl PostgresEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct EventRow {
    id: i64,
    title: String,
    date: DateTime<Utc>,
    user_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<EventRow> for Event {
    type Error = EventError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        Ok(Event {
            id: EventId(row.id),
            title: EventTitle::new(row.title)?,
            date: row.date,
            user_id: UserId(row.user_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn database_error(e: sqlx::Error) -> EventError {
    EventError::DatabaseError(e.to_string())
}

#[async_trait]
impl EventRepository for PostgresEventRepository {
    async fn create(&self, event: NewEvent) -> Result<Event, EventError> {
        sqlx::query_as::<_, EventRow>(
            r#"
            INSERT INTO events (title, date, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, date, user_id, created_at, updated_at
            "#,
        )
        .bind(event.title.as_str())
        .bind(event.date)
        .bind(event.user_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?
        .try_into()
    }

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, EventError> {
        sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, title, date, user_id, created_at, updated_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .map(Event::try_from)
        .transpose()
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Event>, EventError> {
        sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, title, date, user_id, created_at, updated_at
            FROM events
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?
        .into_iter()
        .map(Event::try_from)
        .collect()
    }

    async fn update(&self, event: Event) -> Result<Event, EventError> {
        let result = sqlx::query(
            r#"
            UPDATE events
            SET title = $2, date = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(event.id.0)
        .bind(event.title.as_str())
        .bind(event.date)
        .bind(event.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(EventError::NotFound(event.id.to_string()));
        }

        Ok(event)
    }

    async fn delete(&self, id: &EventId) -> Result<(), EventError> {
        let result = sqlx::query(
            r#"
            DELETE FROM events
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(EventError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
