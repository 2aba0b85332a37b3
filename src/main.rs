use anyhow::Context;

use hello_server::configuration::get_configuration;
use hello_server::startup::Application;
use hello_server::telemetry::{get_subscriber, initialize_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("hello-server".into(), "info".into(), std::io::stdout);
    initialize_subscriber(subscriber);

    let configuration = get_configuration().context("Failed to read configuration")?;
    let application = Application::build(&configuration)
        .await
        .context("Failed to start up the application")?;

    application.run_until_stopped().await?;

    Ok(())
}
