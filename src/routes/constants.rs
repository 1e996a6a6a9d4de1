//! Common constants used across route handlers

/// Message returned with a successful waitlist signup
pub const WAITLIST_JOINED: &str = "Successfully joined waitlist!";

/// Generic error message for internal server errors
pub const ERROR_INTERNAL_SERVER_ERROR: &str = "Internal server error. Please try again later.";

/// Error message when the email provider refused the confirmation email
pub const ERROR_EMAIL_SERVICE_UNAVAILABLE: &str =
    "Email service temporarily unavailable. Please try again later.";

/// Error message for a body that is neither valid JSON nor a valid form
pub const ERROR_INVALID_REQUEST_BODY: &str = "Invalid request body";

/// Error message for a body over the size limit
pub const ERROR_REQUEST_BODY_TOO_LARGE: &str = "Request body too large";

/// Error message for unmatched routes
pub const ERROR_ENDPOINT_NOT_FOUND: &str = "Endpoint not found";

/// Error message for requests from origins outside the allow-list
pub const ERROR_CORS_POLICY_VIOLATION: &str = "CORS policy violation";

/// Value of `status` in health check responses
pub const HEALTH_STATUS_OK: &str = "OK";
