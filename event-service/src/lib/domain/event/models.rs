use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::event::errors::EventTitleError;
use crate::domain::user::models::UserId;

/// Event owned by a single user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: EventId,
    pub title: EventTitle,
    pub date: DateTime<Utc>,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventId(pub i64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Event title value type
///
/// Non-blank, at most 255 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTitle(String);

impl EventTitle {
    const MAX_LENGTH: usize = 255;

    pub fn new(title: String) -> Result<Self, EventTitleError> {
        let length = title.chars().count();
        if title.trim().is_empty() {
            Err(EventTitleError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(EventTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(title))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Event data handed to the store; the store assigns `id` and timestamps.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: EventTitle,
    pub date: DateTime<Utc>,
    pub user_id: UserId,
}

/// Command carrying the writable fields of an event, used for create and replace.
#[derive(Debug, Clone)]
pub struct EventCommand {
    pub title: EventTitle,
    pub date: DateTime<Utc>,
}

impl EventCommand {
    pub fn new(title: EventTitle, date: DateTime<Utc>) -> Self {
        Self { title, date }
    }
}
