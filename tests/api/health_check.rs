use crate::helpers::spawn_app_testing;
use reqwest::StatusCode;

#[tokio::test]
async fn health_check_returns_200_with_empty_body() {
    let app = spawn_app_testing().await.expect("Failed to spawn app");

    let response = app
        .api_client
        .get(format!("{}/health", &app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(StatusCode::OK, response.status());
    assert!(response.text().await.expect("Failed to read body").is_empty());
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = spawn_app_testing().await.expect("Failed to spawn app");

    let response = app
        .api_client
        .get(format!("{}/thank-you", &app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(StatusCode::NOT_FOUND, response.status());
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = spawn_app_testing().await.expect("Failed to spawn app");

    let response = app
        .api_client
        .get(format!("{}/health", &app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.headers().contains_key("x-request-id"));
}
