use crate::helpers::{ADMIN_EMAIL, spawn_app, valid_signup};
use wiremock::matchers::{any, body_partial_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

fn accepted(id: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": id }))
}

#[tokio::test]
async fn join_returns_a_200_and_the_confirmation_id_for_valid_data() {
    // Arrange
    let test_app = spawn_app().await;
    Mock::given(path("/emails"))
        .and(method("POST"))
        .and(header("Authorization", "Bearer re_test_key"))
        .and(body_partial_json(
            serde_json::json!({ "to": ["ursula.le.guin@example.com"] }),
        ))
        .respond_with(accepted("confirmation-id"))
        .expect(1)
        .mount(&test_app.email_server)
        .await;
    Mock::given(path("/emails"))
        .and(method("POST"))
        .and(body_partial_json(serde_json::json!({ "to": [ADMIN_EMAIL] })))
        .respond_with(accepted("admin-id"))
        .expect(1)
        .mount(&test_app.email_server)
        .await;

    // Act
    let response = test_app.post_waitlist(&valid_signup()).await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Successfully joined waitlist!");
    assert_eq!(body["emailId"], "confirmation-id");
    assert!(chrono::DateTime::parse_from_rfc3339(body["timestamp"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn the_confirmation_is_sent_before_the_admin_notification() {
    let test_app = spawn_app().await;
    Mock::given(any())
        .respond_with(accepted("id"))
        .expect(2)
        .mount(&test_app.email_server)
        .await;

    test_app.post_waitlist(&valid_signup()).await;

    let emails = test_app.sent_emails().await;
    assert_eq!(emails.len(), 2);
    assert_eq!(emails[0]["to"][0], "ursula.le.guin@example.com");
    assert_eq!(emails[0]["subject"], "Welcome to the D-Bac AI Tea Waitlist! 🍃");
    assert_eq!(emails[0]["from"], "D-Bac AI Tea <noreply@d-bac-tea.com>");
    assert_eq!(emails[1]["to"][0], ADMIN_EMAIL);
    assert_eq!(emails[1]["subject"], "🎉 New Waitlist Signup: Ursula Le Guin");
    let admin_html = emails[1]["html"].as_str().unwrap();
    assert!(admin_html.contains("Better Sleep"));
    assert!(admin_html.contains("✅ Yes"));
}

#[tokio::test]
async fn join_returns_a_400_with_the_offending_field_for_invalid_data() {
    // Arrange
    let test_app = spawn_app().await;
    Mock::given(any())
        .respond_with(accepted("id"))
        .expect(0)
        .mount(&test_app.email_server)
        .await;
    let test_cases = vec![
        (
            serde_json::json!({ "name": "Ursula", "interest": "sleep" }),
            "email",
            "Email address is required",
        ),
        (
            serde_json::json!({ "email": "ursula@example.com", "interest": "sleep" }),
            "name",
            "Full name is required",
        ),
        (
            serde_json::json!({ "email": "ursula@example.com", "name": "Ursula" }),
            "interest",
            "Please select your primary wellness goal",
        ),
        (
            serde_json::json!({ "email": "not-an-email", "name": "Ursula", "interest": "sleep" }),
            "email",
            "Please enter a valid email address",
        ),
        (
            serde_json::json!({ "email": "ursula@example.com", "name": " U ", "interest": "sleep" }),
            "name",
            "Name must be at least 2 characters long",
        ),
        (
            serde_json::json!({ "email": "ursula@example.com", "name": "Ursula", "interest": "Sleep" }),
            "interest",
            "Invalid interest selection",
        ),
        (
            serde_json::json!({}),
            "email",
            "Email address is required",
        ),
    ];

    for (invalid_body, field, message) in test_cases {
        // Act
        let response = test_app.post_waitlist(&invalid_body).await;

        // Assert
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload was {}.",
            invalid_body
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "success": false, "message": message, "field": field }),
            "Unexpected error body for payload {}",
            invalid_body
        );
    }
}

#[tokio::test]
async fn undecodable_bodies_are_rejected_with_a_400() {
    let test_app = spawn_app().await;

    let response = test_app
        .api_client
        .post(format!("{}/api/waitlist", &test_app.address))
        .header("Content-Type", "application/json")
        .body("{ not json")
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid request body");
    // Details stay hidden outside development.
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn bodies_without_a_content_type_are_treated_as_empty() {
    let test_app = spawn_app().await;
    Mock::given(any())
        .respond_with(accepted("id"))
        .expect(0)
        .mount(&test_app.email_server)
        .await;

    let response = test_app
        .api_client
        .post(format!("{}/api/waitlist", &test_app.address))
        .body(valid_signup().to_string())
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "success": false,
            "message": "Email address is required",
            "field": "email"
        })
    );
}

#[tokio::test]
async fn join_returns_a_500_when_the_confirmation_is_rejected() {
    // Arrange
    let test_app = spawn_app().await;
    Mock::given(path("/emails"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
            "statusCode": 422,
            "name": "validation_error",
            "message": "Invalid `from` field."
        })))
        // The admin is never notified when the applicant could not be.
        .expect(1)
        .mount(&test_app.email_server)
        .await;

    // Act
    let response = test_app.post_waitlist(&valid_signup()).await;

    // Assert
    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "success": false,
            "message": "Email service temporarily unavailable. Please try again later."
        })
    );
}

#[tokio::test]
async fn join_returns_a_500_when_the_provider_cannot_be_reached() {
    let test_app = spawn_app().await;
    Mock::given(path("/emails"))
        .respond_with(accepted("late").set_delay(std::time::Duration::from_secs(5)))
        .expect(1)
        .mount(&test_app.email_server)
        .await;

    let response = test_app.post_waitlist(&valid_signup()).await;

    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["message"],
        "Internal server error. Please try again later."
    );
}

#[tokio::test]
async fn an_admin_notification_failure_does_not_fail_the_signup() {
    // Arrange
    let test_app = spawn_app().await;
    Mock::given(path("/emails"))
        .and(body_partial_json(serde_json::json!({ "to": [ADMIN_EMAIL] })))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&test_app.email_server)
        .await;
    Mock::given(path("/emails"))
        .and(body_partial_json(
            serde_json::json!({ "to": ["ursula.le.guin@example.com"] }),
        ))
        .respond_with(accepted("confirmation-id"))
        .expect(1)
        .mount(&test_app.email_server)
        .await;

    // Act
    let response = test_app.post_waitlist(&valid_signup()).await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["emailId"], "confirmation-id");
    assert_eq!(body["success"], true);
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn html_form_submissions_are_accepted() {
    let test_app = spawn_app().await;
    Mock::given(path("/emails"))
        .respond_with(accepted("form-id"))
        .expect(2)
        .mount(&test_app.email_server)
        .await;

    let response = test_app
        .post_waitlist_form("email=le_guin%40example.com&name=Ursula%20Le%20Guin&interest=stress&newsletter=on")
        .await;

    assert_eq!(200, response.status().as_u16());
    let emails = test_app.sent_emails().await;
    let admin_text = emails[1]["text"].as_str().unwrap();
    assert!(admin_text.contains("Stress Relief"));
    assert!(admin_text.contains("Yes"));
}

#[tokio::test]
async fn user_input_is_escaped_in_the_admin_notification() {
    let test_app = spawn_app().await;
    Mock::given(path("/emails"))
        .respond_with(accepted("id"))
        .expect(2)
        .mount(&test_app.email_server)
        .await;

    test_app
        .post_waitlist(&serde_json::json!({
            "email": "ursula@example.com",
            "name": "<script>alert(1)</script>",
            "interest": "general"
        }))
        .await;

    let emails = test_app.sent_emails().await;
    let admin_html = emails[1]["html"].as_str().unwrap();
    assert!(!admin_html.contains("<script>"));
    assert!(admin_html.contains("&lt;script&gt;"));
}
