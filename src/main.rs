use waitlist::configuration::get_configuration;
use waitlist::startup::Application;
use waitlist::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is the normal case outside local development.
    let dotenv = dotenvy::dotenv();

    let subscriber = get_subscriber("waitlist".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);
    if let Ok(path) = dotenv {
        tracing::info!(path = %path.display(), "Loaded environment from file");
    }

    let configuration = get_configuration()?;
    let application = Application::build(configuration).await?;
    application.run_until_stopped().await?;
    Ok(())
}
