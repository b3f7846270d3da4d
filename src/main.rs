use mail_console::application::{init_state, Application};
use mail_console::config::config::Config;
use mail_console::telemetry::init_subscriber;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();

  let level = std::env::var("RUST_LOG").unwrap_or("info".to_string());
  println!("Mail console with RUST_LOG={}", level);
  let filters = vec![
    format!("mail_console={}", level),
    format!("mailer={}", level),
    format!("tower_http={}", level),
  ];

  let config =
    Config::from_env().map_err(|e| anyhow::anyhow!("Failed to read configuration: {}", e))?;
  init_subscriber(&config.app_env, filters)?;

  let state = init_state(&config);
  let application = Application::build(config, state).await?;
  info!("mail console started on port {}", application.port());
  application.run_until_stopped().await?;

  Ok(())
}
