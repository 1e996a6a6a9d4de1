use crate::domain::interest::Interest;
use crate::domain::waitlist_email::WaitlistEmail;
use crate::domain::waitlist_name::WaitlistName;
use chrono::{DateTime, Utc};
use std::net::IpAddr;

/// Signup payload as it arrives over the wire. Every field is optional here:
/// presence is a validation concern, not a deserialization one.
#[derive(Debug, Default, Clone, serde::Deserialize, utoipa::ToSchema)]
pub struct SignupForm {
    pub email: Option<String>,
    pub name: Option<String>,
    pub interest: Option<String>,
    #[schema(value_type = Option<bool>)]
    pub newsletter: Option<serde_json::Value>,
}

/// Signup form field a rejection refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SignupField {
    Email,
    Name,
    Interest,
}

impl SignupField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignupField::Email => "email",
            SignupField::Name => "name",
            SignupField::Interest => "interest",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: SignupField,
    pub message: &'static str,
}

impl ValidationError {
    fn new(field: SignupField, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// A signup that passed every check, already normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSignup {
    pub email: WaitlistEmail,
    pub name: WaitlistName,
    pub interest: Interest,
    pub newsletter: bool,
}

impl TryFrom<&SignupForm> for ValidSignup {
    type Error = ValidationError;

    /// Checks run in a fixed order and the first failure wins: presence of
    /// email, name and interest, then the email shape, the name length and
    /// finally interest membership.
    fn try_from(form: &SignupForm) -> Result<Self, Self::Error> {
        let email = required(&form.email, SignupField::Email, "Email address is required")?;
        let name = required(&form.name, SignupField::Name, "Full name is required")?;
        let interest = required(
            &form.interest,
            SignupField::Interest,
            "Please select your primary wellness goal",
        )?;

        let email = WaitlistEmail::parse(email).map_err(|_| {
            ValidationError::new(SignupField::Email, "Please enter a valid email address")
        })?;
        let name = WaitlistName::parse(name).map_err(|_| {
            ValidationError::new(SignupField::Name, "Name must be at least 2 characters long")
        })?;
        let interest = Interest::parse(interest).map_err(|_| {
            ValidationError::new(SignupField::Interest, "Invalid interest selection")
        })?;

        Ok(Self {
            email,
            name,
            interest,
            newsletter: coerce_flag(form.newsletter.as_ref()),
        })
    }
}

fn required<'a>(
    value: &'a Option<String>,
    field: SignupField,
    message: &'static str,
) -> Result<&'a str, ValidationError> {
    match value.as_deref() {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ValidationError::new(field, message)),
    }
}

/// Checkbox values reach us as JSON booleans from scripts and as strings
/// from plain HTML forms.
fn coerce_flag(value: Option<&serde_json::Value>) -> bool {
    use serde_json::Value;

    match value {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(s)) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "on" | "yes" | "1"
        ),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStatus {
    Pending,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "pending",
        }
    }
}

/// Diagnostic details about where a submission came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestMetadata {
    pub source_ip: Option<IpAddr>,
    pub user_agent: Option<String>,
}

/// One applicant's waitlist entry, built once validation succeeded.
#[derive(Debug, Clone)]
pub struct WaitlistSubmission {
    pub email: WaitlistEmail,
    pub name: WaitlistName,
    pub interest: Interest,
    pub newsletter: bool,
    pub submitted_at: DateTime<Utc>,
    pub status: SubmissionStatus,
    pub metadata: RequestMetadata,
}

impl WaitlistSubmission {
    pub fn new(signup: ValidSignup, submitted_at: DateTime<Utc>, metadata: RequestMetadata) -> Self {
        let ValidSignup {
            email,
            name,
            interest,
            newsletter,
        } = signup;
        Self {
            email,
            name,
            interest,
            newsletter,
            submitted_at,
            status: SubmissionStatus::Pending,
            metadata,
        }
    }
}
