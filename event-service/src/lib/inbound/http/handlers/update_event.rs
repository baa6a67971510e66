use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::create_event::EventRequest;
use super::create_event::EventResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::event::models::EventId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Replace title and date of an event owned by the caller.
pub async fn update_event(
    State(state): State<AppState>,
    AuthenticatedUser { user_id }: AuthenticatedUser,
    Path(event_id): Path<i64>,
    Json(body): Json<EventRequest>,
) -> Result<ApiSuccess<EventResponseData>, ApiError> {
    state
        .event_service
        .update_event(&user_id, &EventId(event_id), body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref event| ApiSuccess::new(StatusCode::OK, event.into()))
}
