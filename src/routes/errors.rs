use crate::domain::SignupField;
use crate::routes::constants::{
    ERROR_CORS_POLICY_VIOLATION, ERROR_ENDPOINT_NOT_FOUND, ERROR_INTERNAL_SERVER_ERROR,
};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// JSON body shared by every failed API call.
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Always `false`
    pub success: bool,
    /// Human-readable description of what went wrong
    pub message: String,
    /// Form field that failed validation
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub field: Option<SignupField>,
    /// Requested path, for unmatched routes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Internal error detail, only filled in the development environment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// An error already mapped to its HTTP representation.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                success: false,
                message: message.into(),
                field: None,
                path: None,
                error: None,
            },
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn not_found(path: impl Into<String>) -> Self {
        let mut error = Self::new(StatusCode::NOT_FOUND, ERROR_ENDPOINT_NOT_FOUND);
        error.body.path = Some(path.into());
        error
    }

    pub fn cors_violation() -> Self {
        Self::new(StatusCode::FORBIDDEN, ERROR_CORS_POLICY_VIOLATION)
    }

    pub fn with_field(mut self, field: SignupField) -> Self {
        self.body.field = Some(field);
        self
    }

    pub fn with_detail(mut self, detail: Option<String>) -> Self {
        self.body.error = detail;
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl Default for ApiError {
    fn default() -> Self {
        Self::internal(ERROR_INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Last line of defence for handlers that panicked.
pub fn panic_response(panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    tracing::error!(panic = %detail, "A request handler panicked");
    ApiError::default().into_response()
}
