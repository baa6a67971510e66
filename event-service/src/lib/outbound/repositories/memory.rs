//! In-process repositories.
//!
//! Used when no database URL is configured and by the integration tests.
//! Identifiers come from a counter that only moves forward, so a deleted row's
//! id is never handed out again.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::event::errors::EventError;
use crate::domain::event::models::Event;
use crate::domain::event::models::EventId;
use crate::domain::event::models::NewEvent;
use crate::domain::event::ports::EventRepository;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

struct Table<T> {
    rows: BTreeMap<i64, T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    table: RwLock<Table<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub async fn count(&self) -> usize {
        self.table.read().await.rows.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        // Uniqueness check and insert happen under one write lock
        let mut table = self.table.write().await;

        if table.rows.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }

        let id = table.next_id();
        let created = User {
            id: UserId(id),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        table.rows.insert(id, created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.table.read().await.rows.get(&id.0).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .table
            .read()
            .await
            .rows
            .values()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        self.table
            .write()
            .await
            .rows
            .remove(&id.0)
            .map(|_| ())
            .ok_or(UserError::NotFound(id.to_string()))
    }
}

#[derive(Default)]
pub struct InMemoryEventRepository {
    table: RwLock<Table<Event>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn create(&self, event: NewEvent) -> Result<Event, EventError> {
        let mut table = self.table.write().await;

        let id = table.next_id();
        let now = Utc::now();
        let created = Event {
            id: EventId(id),
            title: event.title,
            date: event.date,
            user_id: event.user_id,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(id, created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, EventError> {
        Ok(self.table.read().await.rows.get(&id.0).cloned())
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Event>, EventError> {
        Ok(self
            .table
            .read()
            .await
            .rows
            .values()
            .filter(|e| e.user_id == *user_id)
            .cloned()
            .collect())
    }

    async fn update(&self, event: Event) -> Result<Event, EventError> {
        let mut table = self.table.write().await;

        match table.rows.get_mut(&event.id.0) {
            Some(stored) => {
                stored.title = event.title.clone();
                stored.date = event.date;
                stored.updated_at = event.updated_at;
                Ok(stored.clone())
            }
            None => Err(EventError::NotFound(event.id.to_string())),
        }
    }

    async fn delete(&self, id: &EventId) -> Result<(), EventError> {
        self.table
            .write()
            .await
            .rows
            .remove(&id.0)
            .map(|_| ())
            .ok_or(EventError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::domain::event::models::EventTitle;
    use crate::domain::user::models::EmailAddress;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Ana".to_string(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_user_ids_are_monotonic_and_not_reused() {
        let repository = InMemoryUserRepository::new();

        let first = repository.create(new_user("a@x.com")).await.unwrap();
        let second = repository.create(new_user("b@x.com")).await.unwrap();
        assert!(second.id > first.id);

        repository.delete(&second.id).await.unwrap();
        let third = repository.create(new_user("c@x.com")).await.unwrap();
        assert!(third.id > second.id);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repository = InMemoryUserRepository::new();

        repository.create(new_user("ana@x.com")).await.unwrap();
        let result = repository.create(new_user("ana@x.com")).await;

        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
        assert_eq!(repository.count().await, 1);
    }

    #[tokio::test]
    async fn test_email_lookup_is_case_sensitive() {
        let repository = InMemoryUserRepository::new();
        repository.create(new_user("ana@x.com")).await.unwrap();

        assert!(repository
            .find_by_email("ana@x.com")
            .await
            .unwrap()
            .is_some());
        assert!(repository
            .find_by_email("ANA@x.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_events_listed_per_user() {
        let repository = InMemoryEventRepository::new();
        let date = Utc.with_ymd_and_hms(2024, 8, 1, 12, 0, 0).unwrap();

        for (title, owner) in [("one", 1), ("two", 2), ("three", 1)] {
            repository
                .create(NewEvent {
                    title: EventTitle::new(title.to_string()).unwrap(),
                    date,
                    user_id: UserId(owner),
                })
                .await
                .unwrap();
        }

        let events = repository.list_by_user(&UserId(1)).await.unwrap();
        let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["one", "three"]);
    }

    #[tokio::test]
    async fn test_delete_missing_event() {
        let repository = InMemoryEventRepository::new();
        let result = repository.delete(&EventId(1)).await;
        assert!(matches!(result, Err(EventError::NotFound(_))));
    }
}
