use crate::helpers::{ALLOWED_ORIGIN, spawn_app, valid_signup};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn requests_from_unknown_origins_are_refused_before_any_email_is_sent() {
    // Arrange
    let test_app = spawn_app().await;
    Mock::given(path("/emails"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "x"})))
        .expect(0)
        .mount(&test_app.email_server)
        .await;

    // Act
    let response = test_app
        .api_client
        .post(format!("{}/api/waitlist", &test_app.address))
        .header("Origin", "https://evil.example")
        .json(&valid_signup())
        .send()
        .await
        .expect("Failed to execute request.");

    // Assert
    assert_eq!(403, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({"success": false, "message": "CORS policy violation"})
    );
}

#[tokio::test]
async fn allowed_origins_get_credentialed_cors_headers() {
    let test_app = spawn_app().await;

    let response = test_app
        .api_client
        .get(format!("{}/api/health", &test_app.address))
        .header("Origin", ALLOWED_ORIGIN)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(200, response.status().as_u16());
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        ALLOWED_ORIGIN
    );
    assert_eq!(
        response.headers()["access-control-allow-credentials"],
        "true"
    );
}

#[tokio::test]
async fn localhost_origins_are_always_allowed() {
    let test_app = spawn_app().await;

    for origin in ["http://localhost:5173", "http://127.0.0.1:3000"] {
        let response = test_app
            .api_client
            .get(format!("{}/api/health", &test_app.address))
            .header("Origin", origin)
            .send()
            .await
            .expect("Failed to execute request.");

        assert_eq!(200, response.status().as_u16(), "{} was refused", origin);
        assert_eq!(response.headers()["access-control-allow-origin"], origin);
    }
}

#[tokio::test]
async fn preflight_requests_list_the_allowed_methods() {
    let test_app = spawn_app().await;

    let response = test_app
        .api_client
        .request(
            reqwest::Method::OPTIONS,
            format!("{}/api/waitlist", &test_app.address),
        )
        .header("Origin", ALLOWED_ORIGIN)
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    let methods = response.headers()["access-control-allow-methods"]
        .to_str()
        .unwrap()
        .to_string();
    assert!(methods.contains("POST"));
    assert!(methods.contains("OPTIONS"));
}
