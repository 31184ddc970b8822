use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use uuid::Uuid;

use crate::qr;
use crate::render;
use crate::utils::error::AppError;
use crate::AppState;

/// Visitor page. Looking the event up also records the view; private and
/// missing events both come back as NotFound.
pub async fn view_event_page(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let event = state.store.record_view(id).await?;
    let page = render::render_event_page(&event);

    Ok(Html(page).into_response())
}

/// PNG QR code for the visitor page URL. The payload depends only on the
/// event id and the configured base URL, never on the content.
pub async fn event_qr_png(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let event = state.store.get(id).await?;
    if !event.is_public {
        return Err(AppError::NotFound(format!(
            "Event with id '{}' was not found",
            id
        )));
    }

    let png = qr::encode(&state.config.page_url(event.id))?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}
