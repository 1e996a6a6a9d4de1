use crate::configuration::Environment;
use crate::domain::{RequestMetadata, SignupForm, ValidSignup, ValidationError, WaitlistSubmission};
use crate::email_client::EmailClientError;
use crate::notification_dispatcher::ConfirmationFailed;
use crate::routes::constants::{
    ERROR_EMAIL_SERVICE_UNAVAILABLE, ERROR_INTERNAL_SERVER_ERROR, ERROR_INVALID_REQUEST_BODY,
    ERROR_REQUEST_BODY_TOO_LARGE, WAITLIST_JOINED,
};
use crate::routes::errors::{ApiError, ErrorBody};
use crate::startup::AppState;
use crate::telemetry::error_chain_fmt;
use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, FromRequest, Request, State};
use axum::http::StatusCode;
use axum::http::header::{CONTENT_TYPE, USER_AGENT};
use axum::{Form, Json};
use chrono::{SecondsFormat, Utc};
use std::net::SocketAddr;

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JoinWaitlistResponse {
    /// Always `true`
    pub success: bool,
    pub message: &'static str,
    /// Provider identifier of the confirmation email
    pub email_id: String,
    /// RFC 3339 timestamp of the signup
    pub timestamp: String,
}

/// A signup body, accepted as JSON or as an HTML form, plus where it came from.
#[derive(Debug)]
pub struct WaitlistRequest {
    pub form: SignupForm,
    pub metadata: RequestMetadata,
}

impl FromRequest<AppState> for WaitlistRequest {
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let metadata = RequestMetadata {
            source_ip: request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(address)| address.ip()),
            user_agent: request
                .headers()
                .get(USER_AGENT)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned),
        };
        let is_html_form = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

        let form = if is_html_form {
            match Form::<SignupForm>::from_request(request, state).await {
                Ok(Form(form)) => form,
                Err(rejection) => {
                    return Err(unreadable_body(
                        rejection.status(),
                        rejection.body_text(),
                        state.environment,
                    ));
                }
            }
        } else {
            match Json::<SignupForm>::from_request(request, state).await {
                Ok(Json(form)) => form,
                // A body of unknown type is ignored, so validation reports
                // the first missing field.
                Err(JsonRejection::MissingJsonContentType(_)) => SignupForm::default(),
                Err(rejection) => {
                    return Err(unreadable_body(
                        rejection.status(),
                        rejection.body_text(),
                        state.environment,
                    ));
                }
            }
        };
        Ok(Self { form, metadata })
    }
}

fn unreadable_body(status: StatusCode, detail: String, environment: Environment) -> ApiError {
    tracing::info!(%status, %detail, "Rejected an unreadable waitlist request body");
    let error = if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::new(status, ERROR_REQUEST_BODY_TOO_LARGE)
    } else {
        ApiError::bad_request(ERROR_INVALID_REQUEST_BODY)
    };
    error.with_detail(environment.exposes_error_details().then_some(detail))
}

#[derive(thiserror::Error)]
pub enum WaitlistError {
    #[error("{0}")]
    ValidationError(#[from] ValidationError),
    #[error("The email provider did not accept the confirmation email")]
    NotificationServiceError(#[source] EmailClientError),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for WaitlistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<ConfirmationFailed> for WaitlistError {
    fn from(ConfirmationFailed(error): ConfirmationFailed) -> Self {
        match error {
            rejected @ EmailClientError::Rejected { .. } => {
                WaitlistError::NotificationServiceError(rejected)
            }
            // Timeouts, connection resets and undecodable answers never
            // got a verdict from the provider.
            other => WaitlistError::UnexpectedError(
                anyhow::Error::new(other).context("Failed to send the confirmation email"),
            ),
        }
    }
}

impl WaitlistError {
    /// Maps the error to its HTTP shape. Internal details are attached only
    /// when `environment` allows it.
    pub fn into_api_error(self, environment: Environment) -> ApiError {
        let detail = |error: &dyn std::fmt::Display| {
            environment
                .exposes_error_details()
                .then(|| error.to_string())
        };
        match self {
            WaitlistError::ValidationError(error) => {
                tracing::info!(field = error.field.as_str(), "Rejected waitlist submission: {}", error);
                ApiError::bad_request(error.message).with_field(error.field)
            }
            WaitlistError::NotificationServiceError(ref error) => {
                tracing::error!(error.cause_chain = ?self, "Waitlist submission failed");
                ApiError::internal(ERROR_EMAIL_SERVICE_UNAVAILABLE).with_detail(detail(error))
            }
            WaitlistError::UnexpectedError(ref error) => {
                tracing::error!(error.cause_chain = ?self, "Waitlist submission failed");
                let chain = format!("{:#}", error);
                ApiError::internal(ERROR_INTERNAL_SERVER_ERROR).with_detail(detail(&chain))
            }
        }
    }
}

/// Join the waitlist
///
/// Validates the signup, emails a confirmation to the applicant and notifies
/// the site operator.
#[utoipa::path(
    post,
    path = "/api/waitlist",
    tag = "waitlist",
    request_body = SignupForm,
    responses(
        (status = 200, description = "Signup accepted and confirmation sent", body = JoinWaitlistResponse),
        (status = 400, description = "A field is missing or invalid", body = ErrorBody),
        (status = 403, description = "Origin not allowed", body = ErrorBody),
        (status = 413, description = "Request body larger than 10 MiB", body = ErrorBody),
        (status = 500, description = "Confirmation email could not be sent", body = ErrorBody),
    )
)]
#[tracing::instrument(
    name = "Adding a new waitlist submission",
    skip(state, request),
    fields(
        subscriber_email = tracing::field::Empty,
        interest = tracing::field::Empty
    )
)]
pub async fn join_waitlist(
    State(state): State<AppState>,
    request: WaitlistRequest,
) -> Result<Json<JoinWaitlistResponse>, ApiError> {
    let environment = state.environment;
    process_submission(&state, request)
        .await
        .map(Json)
        .map_err(|error| error.into_api_error(environment))
}

async fn process_submission(
    state: &AppState,
    request: WaitlistRequest,
) -> Result<JoinWaitlistResponse, WaitlistError> {
    let signup = ValidSignup::try_from(&request.form)?;
    tracing::Span::current()
        .record("subscriber_email", tracing::field::display(&signup.email))
        .record("interest", signup.interest.as_str());

    let submission = WaitlistSubmission::new(signup, Utc::now(), request.metadata);
    // Entries are not stored anywhere yet: the log line is the only record.
    tracing::info!(
        applicant_name = %submission.name,
        newsletter = submission.newsletter,
        status = submission.status.as_str(),
        submitted_at = %submission.submitted_at,
        source_ip = ?submission.metadata.source_ip,
        user_agent = ?submission.metadata.user_agent,
        "Waitlist entry received"
    );

    let receipt = state.dispatcher.dispatch(&submission).await?;
    tracing::info!(email_id = %receipt.email_id, "Waitlist submission successful");

    Ok(JoinWaitlistResponse {
        success: true,
        message: WAITLIST_JOINED,
        email_id: receipt.email_id,
        timestamp: receipt
            .timestamp
            .to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
