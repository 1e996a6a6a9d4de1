//! Email copy for the waitlist, rendered from a validated submission.
//!
//! Rendering is pure: no I/O and no clock reads, the timestamp comes from
//! the submission itself.

use crate::domain::WaitlistSubmission;

const BRAND_FOOTER: &str = "D-Bac AI Health Tea | Wellness in Every Cup";

/// A fully rendered message, ready to be handed to an `EmailSender`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html_content: String,
    pub text_content: String,
}

/// Welcome message sent to the applicant.
pub fn confirmation_email(submission: &WaitlistSubmission) -> RenderedEmail {
    let interest = submission.interest.display_label();
    let html_content = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <div style="text-align: center; margin-bottom: 30px;">
        <h1 style="color: #27ae60; margin-bottom: 10px;">Welcome to D-Bac AI Tea!</h1>
        <p style="color: #7f8c8d; font-size: 18px;">Thank you for joining our exclusive waitlist</p>
    </div>
    <div style="background-color: #f8f9fa; padding: 20px; border-radius: 10px; margin-bottom: 20px;">
        <h2 style="color: #2c3e50; margin-bottom: 15px;">What's Next?</h2>
        <ul style="color: #2c3e50; line-height: 1.6;">
            <li>🎁 <strong>Early Access:</strong> You'll be among the first to try our premium AI-crafted tea blends</li>
            <li>💰 <strong>Launch Discount:</strong> Enjoy 20% off your first order when we launch</li>
            <li>📧 <strong>Exclusive Content:</strong> Receive wellness tips and tea recipes</li>
            <li>⭐ <strong>VIP Support:</strong> Priority customer service</li>
        </ul>
    </div>
    <div style="background-color: #e8f5e8; padding: 15px; border-radius: 8px; margin-bottom: 20px;">
        <p style="color: #27ae60; margin: 0; font-weight: 600;">Your Interest: {interest}</p>
    </div>
    <div style="text-align: center; margin-top: 30px;">
        <p style="color: #7f8c8d; font-size: 14px;">We'll notify you as soon as our premium tea blends are ready!</p>
        <p style="color: #7f8c8d; font-size: 12px; margin-top: 20px;">{footer}</p>
    </div>
</div>"#,
        interest = escape_html(interest),
        footer = BRAND_FOOTER,
    );
    let text_content = format!(
        "Welcome to D-Bac AI Tea!\n\
        Thank you for joining our exclusive waitlist.\n\n\
        What's next?\n\
        - Early Access: you'll be among the first to try our premium AI-crafted tea blends\n\
        - Launch Discount: enjoy 20% off your first order when we launch\n\
        - Exclusive Content: receive wellness tips and tea recipes\n\
        - VIP Support: priority customer service\n\n\
        Your Interest: {interest}\n\n\
        We'll notify you as soon as our premium tea blends are ready!\n\
        {footer}\n",
        footer = BRAND_FOOTER,
    );
    RenderedEmail {
        subject: "Welcome to the D-Bac AI Tea Waitlist! 🍃".to_string(),
        html_content,
        text_content,
    }
}

/// Internal alert about a new signup.
pub fn admin_notification(submission: &WaitlistSubmission) -> RenderedEmail {
    let name = submission.name.as_ref();
    let email = submission.email.as_ref();
    let interest = submission.interest.display_label();
    let timestamp = submission
        .submitted_at
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string();
    let (newsletter_html, newsletter_text) = if submission.newsletter {
        ("✅ Yes", "Yes")
    } else {
        ("❌ No", "No")
    };

    let html_content = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <div style="background-color: #27ae60; color: white; padding: 20px; border-radius: 10px; text-align: center; margin-bottom: 20px;">
        <h1 style="margin: 0; font-size: 24px;">🎉 New Waitlist Signup!</h1>
    </div>
    <div style="background-color: #f8f9fa; padding: 20px; border-radius: 10px; margin-bottom: 20px;">
        <h2 style="color: #2c3e50; margin-bottom: 15px;">Customer Details</h2>
        <table style="width: 100%; border-collapse: collapse;">
            {name_row}
            {email_row}
            <tr>
                <td style="padding: 8px 0; font-weight: bold; color: #2c3e50;">Interest:</td>
                <td style="padding: 8px 0; color: #27ae60; font-weight: 600;">{interest}</td>
            </tr>
            {newsletter_row}
            {timestamp_row}
        </table>
    </div>
    <div style="text-align: center; margin-top: 30px;">
        <p style="color: #7f8c8d; font-size: 14px;">{footer}</p>
    </div>
</div>"#,
        name_row = detail_row("Name", &escape_html(name)),
        email_row = detail_row("Email", &escape_html(email)),
        interest = escape_html(interest),
        newsletter_row = detail_row("Newsletter", newsletter_html),
        timestamp_row = detail_row("Timestamp", &timestamp),
        footer = BRAND_FOOTER,
    );
    let text_content = format!(
        "New waitlist signup!\n\n\
        Name: {name}\n\
        Email: {email}\n\
        Interest: {interest}\n\
        Newsletter: {newsletter_text}\n\
        Timestamp: {timestamp}\n"
    );
    RenderedEmail {
        // Subjects are plain text, no escaping needed.
        subject: format!("🎉 New Waitlist Signup: {}", name),
        html_content,
        text_content,
    }
}

fn detail_row(label: &str, value: &str) -> String {
    format!(
        r#"<tr>
                <td style="padding: 8px 0; font-weight: bold; color: #2c3e50;">{label}:</td>
                <td style="padding: 8px 0; color: #2c3e50;">{value}</td>
            </tr>"#
    )
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
