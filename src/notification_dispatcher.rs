use crate::domain::{WaitlistEmail, WaitlistSubmission};
use crate::email_client::{EmailClientError, EmailData, EmailSender};
use crate::email_templates::{RenderedEmail, admin_notification, confirmation_email};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Sends the two emails that follow a successful signup.
#[derive(Clone, Debug)]
pub struct NotificationDispatcher {
    email_sender: Arc<dyn EmailSender>,
    admin_recipient: WaitlistEmail,
}

/// Outcome of a dispatch that reached the applicant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReceipt {
    pub email_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(thiserror::Error, Debug)]
#[error("Failed to send the confirmation email")]
pub struct ConfirmationFailed(#[source] pub EmailClientError);

impl NotificationDispatcher {
    pub fn new(email_sender: Arc<dyn EmailSender>, admin_recipient: WaitlistEmail) -> Self {
        Self {
            email_sender,
            admin_recipient,
        }
    }

    /// The confirmation is sent first and must succeed; the admin
    /// notification is only attempted afterwards and its failure is logged,
    /// never returned.
    #[tracing::instrument(
        name = "Dispatching waitlist notifications",
        skip(self, submission),
        fields(subscriber_email = %submission.email)
    )]
    pub async fn dispatch(
        &self,
        submission: &WaitlistSubmission,
    ) -> Result<DispatchReceipt, ConfirmationFailed> {
        let confirmation = confirmation_email(submission);
        let receipt = self
            .send(&submission.email, &confirmation)
            .await
            .map_err(ConfirmationFailed)?;
        tracing::info!(email_id = %receipt.id, "Confirmation email accepted by the provider");

        let notification = admin_notification(submission);
        match self.send(&self.admin_recipient, &notification).await {
            Ok(admin_receipt) => {
                tracing::info!(
                    email_id = %admin_receipt.id,
                    admin_email = %self.admin_recipient,
                    "Admin notification sent"
                );
            }
            Err(error) => {
                tracing::error!(
                    error.cause_chain = ?error,
                    admin_email = %self.admin_recipient,
                    "Failed to send admin notification"
                );
            }
        }

        Ok(DispatchReceipt {
            email_id: receipt.id,
            timestamp: Utc::now(),
        })
    }

    async fn send(
        &self,
        recipient: &WaitlistEmail,
        email: &RenderedEmail,
    ) -> Result<crate::email_client::EmailReceipt, EmailClientError> {
        self.email_sender
            .send_email(EmailData {
                recipient,
                subject: &email.subject,
                html_content: &email.html_content,
                text_content: &email.text_content,
            })
            .await
    }
}
