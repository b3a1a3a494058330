use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by request handlers.
///
/// Store failures are passed through to the client as-is: the raw SQLite
/// error code (when there is one) plus its message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("store error: {source}")]
    Store {
        status: StatusCode,
        #[source]
        source: sqlx::Error,
    },

    #[error("{0}")]
    NotFound(String),

    #[error("export failed: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),

    #[error("failed to clear {what}")]
    Clear {
        what: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn store(status: StatusCode) -> impl FnOnce(sqlx::Error) -> ApiError {
        move |source| ApiError::Store { status, source }
    }

    pub fn internal(source: sqlx::Error) -> ApiError {
        ApiError::Store {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            source,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Store { status, .. } => *status,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Export(_) | ApiError::Clear { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Store { source, .. } => {
                let code = source
                    .as_database_error()
                    .and_then(|e| e.code())
                    .map(|c| c.into_owned());
                json!({ "code": code, "message": source.to_string() })
            }
            ApiError::NotFound(message) => json!({ "message": message }),
            ApiError::Export(e) => json!({ "message": e.to_string() }),
            ApiError::Clear { what, .. } => json!({ "error": format!("Failed to clear {what}") }),
        };
        (status, Json(body)).into_response()
    }
}
