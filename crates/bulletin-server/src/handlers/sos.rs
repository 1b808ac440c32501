//! SOS handler

use crate::error::ApiError;
use crate::AppState;
use super::lenient_body;
use axum::{body::Bytes, extract::State, http::HeaderMap, Json};
use bulletin_types::{MessageResponse, NewEvent, SosRequest};
use chrono::Utc;

/// Record an emergency event. The timestamp is generated here and the
/// `emergency` flag is always stored as true.
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<MessageResponse>, ApiError> {
    let req_body: SosRequest = lenient_body(&headers, &body);
    let event = NewEvent::sos(req_body, Utc::now());

    match state.db.insert(&event).await {
        Ok(id) => {
            tracing::warn!(
                "SOS event recorded: id={}, location={:?}, poster={:?}",
                id,
                event.location,
                event.poster
            );
            Ok(Json(MessageResponse::new("SOS event added successfully")))
        }
        Err(e) => {
            tracing::error!("Error adding SOS event: {}", e);
            Err(ApiError::internal("Error adding SOS event"))
        }
    }
}
