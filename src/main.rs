use clap::Parser;
use tracing_subscriber::EnvFilter;

use eduplan_api::cli::{self, Cli};
use eduplan_api::config::Environment;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, SECRET_KEY, etc.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Test runs stay quiet, matching the test harness
    let environment = Environment::from_env();
    if environment != Environment::Test {
        let default_level = match environment {
            Environment::Development => "eduplan_api=debug,tower_http=debug,info",
            _ => "info",
        };
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
            )
            .init();
    }

    if let Err(e) = cli::run(cli).await {
        tracing::error!("{e:?}");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }

    Ok(())
}
