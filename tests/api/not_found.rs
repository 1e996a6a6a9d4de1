use crate::helpers::spawn_app;

#[tokio::test]
async fn unknown_endpoints_return_a_json_404() {
    let test_app = spawn_app().await;

    let response = test_app
        .api_client
        .get(format!("{}/api/unknown?ref=nav", &test_app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(404, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "success": false,
            "message": "Endpoint not found",
            "path": "/api/unknown?ref=nav"
        })
    );
}

#[tokio::test]
async fn the_waitlist_only_accepts_post() {
    let test_app = spawn_app().await;

    for method in [reqwest::Method::GET, reqwest::Method::PUT, reqwest::Method::DELETE] {
        let response = test_app
            .api_client
            .request(method.clone(), format!("{}/api/waitlist", &test_app.address))
            .send()
            .await
            .expect("Failed to execute request.");

        assert_eq!(
            404,
            response.status().as_u16(),
            "{} /api/waitlist should be unmatched",
            method
        );
    }
}
