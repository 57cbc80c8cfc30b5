use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("prediction storage is unavailable: {0}")]
    StorageUnavailable(#[from] sqlx::Error),

    #[error("catalog has {available} breeds but {required} are needed for a prediction")]
    InsufficientCatalogSize { available: usize, required: usize },

    #[error("could not read the uploaded image: {0}")]
    MalformedImage(#[from] image::ImageError),

    #[error("unsupported file type {0:?}, expected jpg, jpeg or png")]
    UnsupportedFormat(String),

    #[error("no image was uploaded")]
    MissingUpload,

    #[error("invalid upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("breed {0:?} is not in the catalog")]
    UnknownBreed(String),

    #[error("invalid prediction record: {0}")]
    InvalidRecord(String),

    #[error("breed not found: {0}")]
    BreedNotFound(String),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::InsufficientCatalogSize { .. } | Self::Task(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::MalformedImage(_) | Self::MissingUpload | Self::Multipart(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::UnknownBreed(_) | Self::InvalidRecord(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BreedNotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }

        let body = Json(json!({"error": self.to_string(), "success": false}));
        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
