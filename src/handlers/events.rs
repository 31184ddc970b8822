use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Event;
use crate::utils::error::AppError;
use crate::utils::response::{created, empty_success, success};
use crate::AppState;

const MAX_TITLE_LENGTH: usize = 255;
const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 200;

#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub content: String,
    #[serde(default = "default_is_public")]
    pub is_public: bool,
}

fn default_is_public() -> bool {
    true
}

/// Full replacement of title and content; visibility changes only when the
/// field is present.
#[derive(Deserialize)]
pub struct UpdateEventRequest {
    pub title: String,
    pub content: String,
    pub is_public: Option<bool>,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Event record plus the stable visitor URLs an organizer needs to print.
#[derive(Serialize)]
pub struct EventWithLinks {
    #[serde(flatten)]
    pub event: Event,
    pub page_url: String,
    pub qr_url: String,
}

impl EventWithLinks {
    fn new(event: Event, state: &AppState) -> Self {
        let page_url = state.config.page_url(event.id);
        let qr_url = state.config.qr_url(event.id);
        Self {
            event,
            page_url,
            qr_url,
        }
    }
}

pub async fn create_event(
    State(state): State<AppState>,
    Json(payload): Json<CreateEventRequest>,
) -> Result<Response, AppError> {
    let title = validate_title(&payload.title)?;
    let content = validate_content(&payload.content)?;

    let event = state.store.create(title, content, payload.is_public).await?;
    tracing::info!(event_id = %event.id, "Event created");

    let body = EventWithLinks::new(event, &state);
    Ok(created(body, "Event created").into_response())
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let event = state.store.get(id).await?;
    let body = EventWithLinks::new(event, &state);
    Ok(success(body, "Event retrieved").into_response())
}

pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Response, AppError> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let offset = params.offset.unwrap_or(0).max(0);

    let events = state.store.list(limit, offset).await?;
    let body: Vec<EventWithLinks> = events
        .into_iter()
        .map(|event| EventWithLinks::new(event, &state))
        .collect();

    Ok(success(body, "Events retrieved").into_response())
}

pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<Response, AppError> {
    let title = validate_title(&payload.title)?;
    let content = validate_content(&payload.content)?;

    let event = state
        .store
        .update(id, title, content, payload.is_public)
        .await?;
    tracing::info!(event_id = %event.id, "Event updated");

    let body = EventWithLinks::new(event, &state);
    Ok(success(body, "Event updated").into_response())
}

pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    state.store.delete(id).await?;
    tracing::info!(event_id = %id, "Event deleted");

    Ok(empty_success("Event deleted").into_response())
}

fn validate_title(title: &str) -> Result<&str, AppError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError("Title required".to_string()));
    }
    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(AppError::ValidationError(format!(
            "Title too long (max {} chars)",
            MAX_TITLE_LENGTH
        )));
    }
    Ok(trimmed)
}

fn validate_content(content: &str) -> Result<&str, AppError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError("Content required".to_string()));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_title_trims_and_accepts() {
        assert_eq!(validate_title("  Spring Fair  ").unwrap(), "Spring Fair");
    }

    #[test]
    fn test_validate_title_rejects_empty() {
        assert!(matches!(
            validate_title("   "),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_title_rejects_over_255_chars() {
        let long = "x".repeat(MAX_TITLE_LENGTH + 1);
        assert!(matches!(
            validate_title(&long),
            Err(AppError::ValidationError(_))
        ));

        let exact = "x".repeat(MAX_TITLE_LENGTH);
        assert!(validate_title(&exact).is_ok());
    }

    #[test]
    fn test_validate_content_rejects_empty() {
        assert!(matches!(
            validate_content(""),
            Err(AppError::ValidationError(_))
        ));
        assert_eq!(validate_content(" hello ").unwrap(), "hello");
    }

    #[test]
    fn test_create_request_defaults_to_public() {
        let payload: CreateEventRequest =
            serde_json::from_str(r#"{"title": "t", "content": "c"}"#).unwrap();
        assert!(payload.is_public);
    }

    #[test]
    fn test_update_request_visibility_is_optional() {
        let payload: UpdateEventRequest =
            serde_json::from_str(r#"{"title": "t", "content": "c"}"#).unwrap();
        assert!(payload.is_public.is_none());
    }
}
