//! AEGIS OpenTRUST front-end server

use anyhow::Context;
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "aegis-ui")]
#[command(about = "Serve the AEGIS OpenTRUST front-end")]
#[command(version)]
struct Cli {
    /// Directory to serve (defaults to the working directory)
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Interface to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 8787)]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aegis_ui=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let root = cli
        .root
        .canonicalize()
        .with_context(|| format!("Cannot serve {}", cli.root.display()))?;
    let app = aegis_ui::router(root.clone());

    let addr = SocketAddr::new(cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(root = %root.display(), "AEGIS UI running at http://localhost:{}", cli.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(aegis_ui::wait_for_shutdown(tokio::signal::ctrl_c()))
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}
