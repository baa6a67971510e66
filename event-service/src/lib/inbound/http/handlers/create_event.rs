use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::event::errors::EventTitleError;
use crate::domain::event::models::Event;
use crate::domain::event::models::EventCommand;
use crate::domain::event::models::EventTitle;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_event(
    State(state): State<AppState>,
    AuthenticatedUser { user_id }: AuthenticatedUser,
    Json(body): Json<EventRequest>,
) -> Result<ApiSuccess<EventResponseData>, ApiError> {
    state
        .event_service
        .create_event(&user_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref event| ApiSuccess::new(StatusCode::CREATED, event.into()))
}

/// HTTP request body for creating or replacing an event (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventRequest {
    #[serde(default)]
    title: String,
    date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Error)]
pub(super) enum ParseEventRequestError {
    #[error("Invalid title: {0}")]
    Title(#[from] EventTitleError),

    #[error("Date is required")]
    MissingDate,
}

impl EventRequest {
    pub(super) fn try_into_command(self) -> Result<EventCommand, ParseEventRequestError> {
        let title = EventTitle::new(self.title)?;
        let date = self.date.ok_or(ParseEventRequestError::MissingDate)?;
        Ok(EventCommand::new(title, date))
    }
}

impl From<ParseEventRequestError> for ApiError {
    fn from(err: ParseEventRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventResponseData {
    pub id: i64,
    pub title: String,
    pub date: DateTime<Utc>,
    pub user_id: i64,
}

impl From<&Event> for EventResponseData {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.0,
            title: event.title.as_str().to_string(),
            date: event.date,
            user_id: event.user_id.0,
        }
    }
}
