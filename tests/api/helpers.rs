use secrecy::SecretString;
use signup_intake::{
    configuration::{Configuration, get_configuration},
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

pub const COLLECTOR_API_KEY: &str = "test-collector-key";

/// Only for integration tests.
#[derive(Debug)]
pub struct TestApp {
    pub address: String,
    pub collector_server: MockServer,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_subscribe(&self, body: serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(format!("{}/api/subscribe", &self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_subscribe_raw(&self, body: &'static str) -> reqwest::Response {
        self.api_client
            .post(format!("{}/api/subscribe", &self.address))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn mock_collector(&self, response: ResponseTemplate) {
        Mock::given(path("/api/signups"))
            .and(method("POST"))
            .respond_with(response)
            .mount(&self.collector_server)
            .await
    }

    pub async fn relayed_bodies(&self) -> Vec<serde_json::Value> {
        self.collector_server
            .received_requests()
            .await
            .expect("Request recording is disabled")
            .iter()
            .map(|r| serde_json::from_slice(&r.body).expect("Relay body is not JSON"))
            .collect()
    }
}

fn init_test_tracing() {
    // TEST_LOG=1 cargo test | bunyan
    let outcome = if std::env::var("TEST_LOG").is_ok() {
        init_subscriber(get_subscriber("test".into(), "debug".into(), std::io::stdout))
    } else {
        init_subscriber(get_subscriber("test".into(), "debug".into(), std::io::sink))
    };
    outcome.expect("Failed to initialize tracing");
}

/// Spawns the app with a mock collector and a complete relay configuration.
pub async fn spawn_app_testing() -> anyhow::Result<TestApp> {
    spawn_app_with(|_| {}).await
}

/// It does the following:
/// 1. Tracing
/// 1. Mock collector server
/// 1. Mutates configuration for test needs, then applies `customize`
/// 1. Spawns a tokio task running the axum server
pub async fn spawn_app_with(customize: impl FnOnce(&mut Configuration)) -> anyhow::Result<TestApp> {
    init_test_tracing();

    let collector_server = MockServer::start().await;

    let config = {
        let mut c = get_configuration()?;
        c.signup.project_slug = "jobsitehours".into();
        c.signup.idea_id = String::new();
        c.collector.base_url = collector_server.uri();
        c.collector.api_key = SecretString::from(COLLECTOR_API_KEY.to_owned());
        c.collector.timeout_ms = 500;
        // randomized OS port
        c.application.port = 0;
        customize(&mut c);
        c
    };

    let application = Application::build(&config).await?;
    let address = application.address()?;

    tokio::spawn(async move {
        application.run().await.expect("Test server failed");
    });

    let api_client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(TestApp {
        address,
        collector_server,
        api_client,
    })
}
