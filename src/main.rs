use anyhow::{Context, Result};
use signup_intake::{configuration::get_configuration, startup::Application, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing().context("Failed to initialize tracing.")?;
    let config = get_configuration().context("Failed to read Configuration.")?;

    let application = Application::build(&config)
        .await
        .context("Failed to build the application.")?;

    tracing::info!(address = %application.address()?, "Listening for signups");

    application.run().await
}
