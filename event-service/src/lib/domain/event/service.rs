use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::event::errors::EventError;
use crate::domain::event::models::Event;
use crate::domain::event::models::EventCommand;
use crate::domain::event::models::EventId;
use crate::domain::event::models::NewEvent;
use crate::domain::event::ports::EventRepository;
use crate::domain::event::ports::EventServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for event operations.
pub struct EventService<ER>
where
    ER: EventRepository,
{
    repository: Arc<ER>,
}

impl<ER> EventService<ER>
where
    ER: EventRepository,
{
    pub fn new(repository: Arc<ER>) -> Self {
        Self { repository }
    }

    async fn owned_event(&self, owner: &UserId, id: &EventId) -> Result<Event, EventError> {
        let event = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(EventError::NotFound(id.to_string()))?;

        if event.user_id != *owner {
            tracing::warn!(event_id = %id, user_id = %owner, "Event access by non-owner");
            return Err(EventError::NotOwner(id.to_string()));
        }

        Ok(event)
    }
}

#[async_trait]
impl<ER> EventServicePort for EventService<ER>
where
    ER: EventRepository,
{
    async fn create_event(
        &self,
        owner: &UserId,
        command: EventCommand,
    ) -> Result<Event, EventError> {
        let event = self
            .repository
            .create(NewEvent {
                title: command.title,
                date: command.date,
                user_id: *owner,
            })
            .await?;

        tracing::debug!(event_id = %event.id, user_id = %owner, "Event created");
        Ok(event)
    }

    async fn list_events(&self, owner: &UserId) -> Result<Vec<Event>, EventError> {
        self.repository.list_by_user(owner).await
    }

    async fn get_event(&self, owner: &UserId, id: &EventId) -> Result<Event, EventError> {
        self.owned_event(owner, id).await
    }

    async fn update_event(
        &self,
        owner: &UserId,
        id: &EventId,
        command: EventCommand,
    ) -> Result<Event, EventError> {
        let mut event = self.owned_event(owner, id).await?;

        event.title = command.title;
        event.date = command.date;
        event.updated_at = Utc::now();

        self.repository.update(event).await
    }

    async fn delete_event(&self, owner: &UserId, id: &EventId) -> Result<(), EventError> {
        self.owned_event(owner, id).await?;
        self.repository.delete(id).await
    }
}
