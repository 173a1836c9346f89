use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use wikimaps::config::{self, AppConfig};
use wikimaps::database::{DatabaseManager, PgGateway};
use wikimaps::session::SessionKeys;
use wikimaps::AppState;

#[derive(Parser)]
#[command(name = "wikimaps")]
#[command(about = "Map annotation server")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Port to listen on, overriding PORT")]
        port: Option<u16>,
    },

    #[command(about = "Create the database tables if they do not exist")]
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so DATABASE_URL and SESSION_SECRET are picked up
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("wikimaps=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = config::config();
    config.validate().context("invalid configuration")?;

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => serve(config, port).await,
        Commands::Migrate => {
            let pool = DatabaseManager::connect(&config.database).await?;
            DatabaseManager::migrate(&pool).await?;
            pool.close().await;
            Ok(())
        }
    }
}

async fn serve(config: &AppConfig, port: Option<u16>) -> anyhow::Result<()> {
    tracing::info!("Starting Wikimaps in {:?} mode", config.environment);
    if wikimaps::is_development!() {
        tracing::warn!("Running with development defaults; set SESSION_SECRET before exposing this server");
    }

    let pool = DatabaseManager::connect(&config.database).await?;
    let sessions = SessionKeys::from_config(&config.session)?;
    let state = AppState::new(Arc::new(PgGateway::new(pool.clone())), sessions);

    let mut app = wikimaps::app(state);
    if config.api.enable_request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }

    let bind_addr = format!("{}:{}", config.server.host, port.unwrap_or(config.server.port));
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Wikimaps listening on http://{}", bind_addr);
    axum::serve(listener, app).await.context("server error")?;

    pool.close().await;
    Ok(())
}
