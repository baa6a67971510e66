use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::create_event::EventResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::event::models::EventId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn get_event(
    State(state): State<AppState>,
    AuthenticatedUser { user_id }: AuthenticatedUser,
    Path(event_id): Path<i64>,
) -> Result<ApiSuccess<EventResponseData>, ApiError> {
    state
        .event_service
        .get_event(&user_id, &EventId(event_id))
        .await
        .map_err(ApiError::from)
        .map(|ref event| ApiSuccess::new(StatusCode::OK, event.into()))
}
