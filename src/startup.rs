use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;

use crate::{
    collector_client::CollectorClient,
    configuration::{Configuration, SignupConfiguration},
    routes::get_router,
};

/// Read-only state shared by every request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub signup: SignupConfiguration,
    /// `None` when the relay is disabled.
    pub collector: Option<CollectorClient>,
}

pub struct Application {
    router: Router,
    listener: TcpListener,
}

impl Application {
    pub async fn build(config: &Configuration) -> anyhow::Result<Self> {
        let collector = CollectorClient::from_config(&config.collector)
            .context("Failed to build the collector client")?;

        if collector.is_none() {
            tracing::warn!("Collector url or api key is missing, signups will only be logged");
        }

        let bind_addr = format!("{}:{}", config.application.host, config.application.port);
        let listener = TcpListener::bind(&bind_addr)
            .await
            .context(format!("Failed to bind to address: {bind_addr}"))?;

        let app_state = AppState {
            signup: config.signup.clone(),
            collector,
        };

        let router = get_router(app_state);

        Ok(Self { router, listener })
    }

    pub fn address(&self) -> anyhow::Result<String> {
        let addr = self
            .listener
            .local_addr()
            .context("Failed to read the listener address")?;
        Ok(format!("http://{addr}"))
    }

    pub async fn run(self) -> anyhow::Result<()> {
        axum::serve(self.listener, self.router)
            .await
            .context("Failed to serve application using axum")
    }
}
