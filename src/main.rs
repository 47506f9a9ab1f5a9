use clap::{Parser, Subcommand};
use configuration::load_settings;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

/// The main entry point for the fleet admin API.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the environment may already be set.
    dotenvy::dotenv().ok();

    // Logging goes through a background writer; the guard flushes it on exit.
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stdout());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .init();

    let cli = Cli::parse();
    let settings = load_settings()?;

    match cli.command {
        Commands::Serve(args) => {
            let addr = match args.addr {
                Some(addr) => addr,
                None => settings.server.socket_addr()?,
            };
            web_server::run_server(&settings, addr).await?;
        }
        Commands::Migrate => {
            let pool = database::connect(&settings.database).await?;
            database::run_migrations(&pool).await?;
            tracing::info!("Database migrations applied.");
        }
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// REST API for managing drivers and facilities.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API.
    Serve(ServeArgs),
    /// Apply the bundled database migrations and exit.
    Migrate,
}

#[derive(Parser)]
struct ServeArgs {
    /// Address to listen on (e.g. "127.0.0.1:3000"). Defaults to the configured host and port.
    #[arg(long)]
    addr: Option<SocketAddr>,
}
