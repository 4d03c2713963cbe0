// Event HTTP routes
//
// Thin handlers over the EventService: extract, call, map the error kind to a
// status code. All business rules live in the engine.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use eventdesk_core::{Event, EventCategory, EventInput, EventService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common::{ApiError, ErrorResponse, ListResponse, MessageResponse};

/// Response for a created event
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateEventResponse {
    /// Identifier assigned by the store
    #[schema(example = "01936f0e-7b1c-7d3a-9c55-2f7f4c1d8a10")]
    pub id: String,
}

/// Request to classify an event with an explicit category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ManualClassifyRequest {
    /// "Requiere gestión" or "Sin gestión"
    #[schema(example = "Sin gestión")]
    pub category: String,
}

/// App state for event routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn EventService>,
}

impl AppState {
    pub fn new(service: Arc<dyn EventService>) -> Self {
        Self { service }
    }
}

/// Create event routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/events", get(list_events).post(create_event))
        .route("/v1/events/needs", get(list_events_needing_action))
        .route("/v1/events/status/:status", get(list_events_by_status))
        .route("/v1/events/category/:category", get(list_events_by_category))
        .route(
            "/v1/events/:id",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route("/v1/events/:id/classify", put(classify_event))
        .route("/v1/events/:id/manual-classify", put(manual_classify_event))
        .with_state(state)
}

/// Malformed JSON bodies are reported as 400 with the usual error shape
fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|e| ApiError::bad_request(format!("invalid event data: {}", e.body_text())))
}

/// POST /v1/events - Create a new event
#[utoipa::path(
    post,
    path = "/v1/events",
    request_body = EventInput,
    responses(
        (status = 201, description = "Event created", body = CreateEventResponse),
        (status = 400, description = "Missing field, invalid status or category", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
        (status = 504, description = "Store deadline exceeded", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<EventInput>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateEventResponse>), ApiError> {
    let input = body(payload)?;
    let event = state.service.create_event(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateEventResponse {
            id: event.id.to_string(),
        }),
    ))
}

/// GET /v1/events - List all events, newest first
#[utoipa::path(
    get,
    path = "/v1/events",
    responses(
        (status = 200, description = "List of events", body = ListResponse<Event>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn list_events(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<Event>>, ApiError> {
    let events = state.service.get_all_events().await?;
    Ok(Json(ListResponse::new(events)))
}

/// GET /v1/events/{id} - Get event by ID
#[utoipa::path(
    get,
    path = "/v1/events/{id}",
    params(
        ("id" = String, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event found", body = Event),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Event>, ApiError> {
    let event = state.service.get_event_by_id(&id).await?;
    Ok(Json(event))
}

/// PUT /v1/events/{id} - Replace the mutable fields of an event
///
/// A reviewed event sent without a category is classified from its type.
#[utoipa::path(
    put,
    path = "/v1/events/{id}",
    params(
        ("id" = String, Path, description = "Event ID")
    ),
    request_body = EventInput,
    responses(
        (status = 200, description = "Event updated", body = Event),
        (status = 400, description = "Missing field, invalid status or category", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<EventInput>, JsonRejection>,
) -> Result<Json<Event>, ApiError> {
    let input = body(payload)?;
    let event = state.service.update_event(&id, input).await?;
    Ok(Json(event))
}

/// DELETE /v1/events/{id} - Delete an event
#[utoipa::path(
    delete,
    path = "/v1/events/{id}",
    params(
        ("id" = String, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event deleted", body = MessageResponse),
        (status = 400, description = "Event could not be deleted", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .service
        .delete_event(&id)
        .await
        .map_err(|e| ApiError::from(e).with_status(StatusCode::BAD_REQUEST))?;

    Ok(Json(MessageResponse::new("Event deleted successfully")))
}

/// PUT /v1/events/{id}/classify - Classify a reviewed event from its type
#[utoipa::path(
    put,
    path = "/v1/events/{id}/classify",
    params(
        ("id" = String, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event classified", body = Event),
        (status = 400, description = "Event is not reviewed", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn classify_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Event>, ApiError> {
    let event = state.service.classify_event(&id).await?;
    Ok(Json(event))
}

/// PUT /v1/events/{id}/manual-classify - Set the category of a reviewed event
#[utoipa::path(
    put,
    path = "/v1/events/{id}/manual-classify",
    params(
        ("id" = String, Path, description = "Event ID")
    ),
    request_body = ManualClassifyRequest,
    responses(
        (status = 200, description = "Event classified", body = Event),
        (status = 400, description = "Invalid category or event is not reviewed", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn manual_classify_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ManualClassifyRequest>, JsonRejection>,
) -> Result<Json<Event>, ApiError> {
    let req = body(payload)?;
    EventCategory::from_str(&req.category)?;

    let event = state
        .service
        .manual_classify_event(&id, &req.category)
        .await?;
    Ok(Json(event))
}

/// GET /v1/events/status/{status} - List events in a lifecycle status
#[utoipa::path(
    get,
    path = "/v1/events/status/{status}",
    params(
        ("status" = String, Path, description = "\"Pendiente por revisar\" or \"Revisado\"")
    ),
    responses(
        (status = 200, description = "Matching events", body = ListResponse<Event>),
        (status = 400, description = "Invalid status", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn list_events_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> Result<Json<ListResponse<Event>>, ApiError> {
    let events = state.service.get_events_by_status(&status).await?;
    Ok(Json(ListResponse::new(events)))
}

/// GET /v1/events/category/{category} - List reviewed events in a category
#[utoipa::path(
    get,
    path = "/v1/events/category/{category}",
    params(
        ("category" = String, Path, description = "\"Requiere gestión\" or \"Sin gestión\"")
    ),
    responses(
        (status = 200, description = "Matching events", body = ListResponse<Event>),
        (status = 400, description = "Invalid category", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn list_events_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<ListResponse<Event>>, ApiError> {
    let events = state.service.get_events_by_category(&category).await?;
    Ok(Json(ListResponse::new(events)))
}

/// GET /v1/events/needs - List reviewed events that need action
#[utoipa::path(
    get,
    path = "/v1/events/needs",
    responses(
        (status = 200, description = "Events that need action", body = ListResponse<Event>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn list_events_needing_action(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<Event>>, ApiError> {
    let events = state.service.get_events_needing_action().await?;
    Ok(Json(ListResponse::new(events)))
}
