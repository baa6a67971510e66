use axum::extract::State;
use axum::http::StatusCode;

use super::create_event::EventResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_events(
    State(state): State<AppState>,
    AuthenticatedUser { user_id }: AuthenticatedUser,
) -> Result<ApiSuccess<Vec<EventResponseData>>, ApiError> {
    state
        .event_service
        .list_events(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|events| {
            ApiSuccess::new(
                StatusCode::OK,
                events.iter().map(EventResponseData::from).collect(),
            )
        })
}
