// --- File: crates/agenda_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::{AgendaError, HttpStatusCode};
use crate::models::ErrorResponse;

// Include the client module
pub mod client;

impl AgendaError {
    fn http_status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// A failed API call: a short user-facing `msg` plus the underlying error.
///
/// Renders as `{"msg": ..., "error": ...}`. The status follows the error kind
/// unless a route pins it with [`ApiFailure::with_status`].
#[derive(Debug)]
pub struct ApiFailure {
    pub msg: String,
    pub error: AgendaError,
    status: StatusCode,
}

impl ApiFailure {
    pub fn new(msg: impl Into<String>, error: impl Into<AgendaError>) -> Self {
        let error = error.into();
        Self {
            msg: msg.into(),
            status: error.http_status(),
            error,
        }
    }

    /// Overrides the status derived from the error kind.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let status = self.status;
        let body = Json(ErrorResponse {
            msg: self.msg,
            error: self.error.detail(),
        });
        (status, body).into_response()
    }
}
