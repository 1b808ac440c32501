//! Event handlers

use crate::error::ApiError;
use crate::AppState;
use super::lenient_body;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use bulletin_types::{CreateEventRequest, Event, MessageResponse, NewEvent};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Event>>, ApiError> {
    match state.db.fetch_all().await {
        Ok(events) => Ok(Json(events)),
        Err(e) => {
            tracing::error!("Error fetching events: {}", e);
            Err(ApiError::internal("Error fetching events"))
        }
    }
}

pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<MessageResponse>, ApiError> {
    let req_body: CreateEventRequest = lenient_body(&headers, &body);
    let event = NewEvent::from(req_body);

    match state.db.insert(&event).await {
        Ok(id) => {
            tracing::info!("New event added to table: id={}", id);
            Ok(Json(MessageResponse::new("Event added successfully")))
        }
        Err(e) => {
            tracing::error!("Error adding event: {}", e);
            Err(ApiError::internal("Error adding event"))
        }
    }
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    match state.db.delete_by_id(&id).await {
        Ok(removed) => {
            if removed == 0 {
                tracing::debug!("No event matched id={}", id);
            } else {
                tracing::info!("Event removed from table: id={}", id);
            }
            Ok(Json(MessageResponse::new("Event removed successfully")))
        }
        Err(e) => {
            tracing::error!("Error removing event: {}", e);
            Err(ApiError::internal("Error removing event"))
        }
    }
}
