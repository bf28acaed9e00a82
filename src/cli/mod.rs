use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::app::{app, AppState};
use crate::auth::password::hash_password;
use crate::config::AppConfig;
use crate::database::pool;

#[derive(Parser)]
#[command(name = "eduplan-api")]
#[command(about = "Curriculum planning API server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Port to listen on (overrides PORT)")]
        port: Option<u16>,

        #[arg(long, help = "Apply pending migrations before serving")]
        migrate: bool,
    },

    #[command(about = "Apply pending database migrations and exit")]
    Migrate,

    #[command(about = "Print the Argon2 hash of a password, for seeding users")]
    HashPassword {
        #[arg(help = "Plaintext password")]
        password: String,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Serve { port: None, migrate: false }) {
        Commands::Serve { port, migrate } => serve(AppConfig::from_env()?, port, migrate).await,
        Commands::Migrate => {
            let config = AppConfig::from_env()?;
            let pool = pool::connect(&config.database).await?;
            pool::migrate(&pool).await?;
            pool.close().await;
            Ok(())
        }
        Commands::HashPassword { password } => {
            println!("{}", hash_password(&password)?);
            Ok(())
        }
    }
}

async fn serve(mut config: AppConfig, port: Option<u16>, migrate: bool) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.api.port = port;
    }

    let pool = pool::connect(&config.database).await?;
    if migrate {
        pool::migrate(&pool).await?;
    }

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!("Listening on http://{} ({:?} mode)", bind_addr, config.environment);

    let state = AppState::new(pool.clone(), config);
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pool.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
