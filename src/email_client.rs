use crate::domain::WaitlistEmail;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};

/// Anything able to hand an email over to a delivery provider.
///
/// The dispatcher only talks to this trait, so tests can count and fail
/// sends without a network round-trip.
#[async_trait::async_trait]
pub trait EmailSender: Send + Sync + std::fmt::Debug {
    async fn send_email<'a>(&self, data: EmailData<'a>) -> Result<EmailReceipt, EmailClientError>;
}

/// Client for the Resend `/emails` API.
#[derive(Clone, Debug)]
pub struct EmailClient {
    base_url: String,
    http_client: Client,
    sender: String,
    authorization_token: Secret<String>,
}

#[derive(serde::Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

#[derive(serde::Deserialize)]
struct SendEmailResponse {
    id: String,
}

#[derive(serde::Deserialize)]
struct ProviderErrorBody {
    name: Option<String>,
    message: Option<String>,
}

#[derive(Debug)]
pub struct EmailData<'a> {
    pub recipient: &'a WaitlistEmail,
    pub subject: &'a str,
    pub html_content: &'a str,
    pub text_content: &'a str,
}

/// Provider-assigned identifier of an accepted email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailReceipt {
    pub id: String,
}

#[derive(thiserror::Error, Debug)]
pub enum EmailClientError {
    #[error("Failed to exchange a request with the email provider")]
    Request(#[from] reqwest::Error),
    #[error("The email provider rejected the request with status {status}: {message}")]
    Rejected {
        status: u16,
        name: Option<String>,
        message: String,
    },
}

impl EmailClient {
    pub fn new(
        base_url: String,
        sender: String,
        authorization_token: Secret<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
            sender,
            authorization_token,
        })
    }
}

#[async_trait::async_trait]
impl EmailSender for EmailClient {
    #[tracing::instrument(
        name = "Sending email",
        skip(self, data),
        fields(recipient = %data.recipient, subject = %data.subject)
    )]
    async fn send_email<'a>(&self, data: EmailData<'a>) -> Result<EmailReceipt, EmailClientError> {
        let url = format!("{}/emails", self.base_url.trim_end_matches('/'));
        let request_body = SendEmailRequest {
            from: &self.sender,
            to: [data.recipient.as_ref()],
            subject: data.subject,
            html: data.html_content,
            text: data.text_content,
        };
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.authorization_token.expose_secret())
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // The body is best effort: Resend answers with JSON, proxies in
            // front of it may not.
            let body = response.text().await.unwrap_or_default();
            let parsed = serde_json::from_str::<ProviderErrorBody>(&body).ok();
            let (name, message) = match parsed {
                Some(ProviderErrorBody { name, message }) => {
                    (name, message.unwrap_or_else(|| body.clone()))
                }
                None => (None, body),
            };
            let error = EmailClientError::Rejected {
                status: status.as_u16(),
                name,
                message,
            };
            tracing::error!("Failed to send email: {:?}", error);
            return Err(error);
        }

        let SendEmailResponse { id } = response.json().await?;
        Ok(EmailReceipt { id })
    }
}
