use axum::body::Bytes;
use axum::http::StatusCode;
use axum::{
    extract::{Json, Multipart, Path, Query, State},
    response::{Html, IntoResponse, Response},
};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::{AppError, AppResult};
use crate::render;
use crate::schema::{HistoryOptions, IMAGE_FIELD};
use crate::session;

/// Pull the image field out of a multipart form.
async fn read_image(multipart: &mut Multipart) -> AppResult<(String, Bytes)> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        return Ok((file_name, bytes));
    }
    Err(AppError::MissingUpload)
}

pub async fn index() -> Html<String> {
    Html(render::index_page())
}

// failures are shown inside the page instead of as JSON
pub async fn predict_page(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let outcome = match read_image(&mut multipart).await {
        Ok((file_name, bytes)) => session::run(&state, &file_name, bytes).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(outcome) => Html(render::result_page(&outcome)).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "prediction page failed");
            (e.status(), Html(render::error_page(&e))).into_response()
        }
    }
}

pub async fn create_prediction(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let (file_name, bytes) = read_image(&mut multipart).await?;
    let outcome = session::run(&state, &file_name, bytes).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({"data": outcome, "success": true})),
    ))
}

pub async fn list_predictions(
    Query(opts): Query<HistoryOptions>,
    State(state): State<AppState>,
) -> AppResult<Json<Value>> {
    let limit = opts.effective_limit(state.config.history_limit);
    let records = state.store.recent(limit).await?;

    Ok(Json(json!({"data": records, "success": true})))
}

pub async fn list_breeds(State(state): State<AppState>) -> Json<Value> {
    Json(json!({"data": state.scorer.catalog().all(), "success": true}))
}

pub async fn get_breed(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<Value>> {
    let breed = state
        .scorer
        .catalog()
        .lookup(&name)
        .ok_or_else(|| AppError::BreedNotFound(name.clone()))?;

    Ok(Json(json!({"data": breed, "success": true})))
}

pub async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}
