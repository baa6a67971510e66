use async_trait::async_trait;

use crate::domain::event::errors::EventError;
use crate::domain::event::models::Event;
use crate::domain::event::models::EventCommand;
use crate::domain::event::models::EventId;
use crate::domain::event::models::NewEvent;
use crate::domain::user::models::UserId;

/// Port for event operations on behalf of an authenticated user.
///
/// Every operation takes the caller's identity; events owned by someone else
/// are never returned or modified.
#[async_trait]
pub trait EventServicePort: Send + Sync + 'static {
    /// Create an event owned by `owner`.
    async fn create_event(&self, owner: &UserId, command: EventCommand)
        -> Result<Event, EventError>;

    /// List the events owned by `owner`, oldest first.
    async fn list_events(&self, owner: &UserId) -> Result<Vec<Event>, EventError>;

    /// Retrieve one event.
    ///
    /// # Errors
    /// * `NotFound` - Event does not exist
    /// * `NotOwner` - Event belongs to another user
    async fn get_event(&self, owner: &UserId, id: &EventId) -> Result<Event, EventError>;

    /// Replace title and date of an event.
    ///
    /// # Errors
    /// * `NotFound` - Event does not exist
    /// * `NotOwner` - Event belongs to another user
    async fn update_event(
        &self,
        owner: &UserId,
        id: &EventId,
        command: EventCommand,
    ) -> Result<Event, EventError>;

    /// Delete an event.
    ///
    /// # Errors
    /// * `NotFound` - Event does not exist
    /// * `NotOwner` - Event belongs to another user
    async fn delete_event(&self, owner: &UserId, id: &EventId) -> Result<(), EventError>;
}

/// Persistence operations for events.
#[async_trait]
pub trait EventRepository: Send + Sync + 'static {
    async fn create(&self, event: NewEvent) -> Result<Event, EventError>;

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, EventError>;

    /// Events owned by `user_id`, ordered by identifier.
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Event>, EventError>;

    /// Persist title, date and `updated_at` of an existing event.
    ///
    /// # Errors
    /// * `NotFound` - Event does not exist
    async fn update(&self, event: Event) -> Result<Event, EventError>;

    /// # Errors
    /// * `NotFound` - Event does not exist
    async fn delete(&self, id: &EventId) -> Result<(), EventError>;
}
