use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

/// Reasons a generation request is turned away.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("QR text must not be empty")]
    EmptyText,

    #[error("A QR code is already being generated")]
    AlreadyGenerating,
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("History index {index} is out of range (length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("QR code {0} not found in history")]
    NotFound(u64),

    #[error("Failed to serialize history: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The in-memory change was applied but could not be written out.
    #[error("Failed to write history: {0}")]
    Write(#[from] std::io::Error),
}

/// Failures of operations that touch both generation state and history.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error(transparent)]
    State(#[from] StateError),
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("Application state lock poisoned")]
    LockPoisoned,
}

fn json_error(status: StatusCode, message: String) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({ "error": message }))
}

impl ResponseError for GenerationError {
    fn status_code(&self) -> StatusCode {
        match self {
            GenerationError::EmptyText => StatusCode::BAD_REQUEST,
            GenerationError::AlreadyGenerating => StatusCode::CONFLICT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        json_error(self.status_code(), self.to_string())
    }
}

impl ResponseError for HistoryError {
    fn status_code(&self) -> StatusCode {
        match self {
            HistoryError::IndexOutOfRange { .. } | HistoryError::NotFound(_) => {
                StatusCode::NOT_FOUND
            }
            HistoryError::Serialize(_) | HistoryError::Write(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        json_error(self.status_code(), self.to_string())
    }
}

impl ResponseError for PreviewError {
    fn status_code(&self) -> StatusCode {
        match self {
            PreviewError::Generation(e) => e.status_code(),
            PreviewError::History(e) => e.status_code(),
            PreviewError::State(e) => e.status_code(),
        }
    }

    fn error_response(&self) -> HttpResponse {
        json_error(self.status_code(), self.to_string())
    }
}

impl ResponseError for StateError {
    fn error_response(&self) -> HttpResponse {
        json_error(self.status_code(), self.to_string())
    }
}
