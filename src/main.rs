use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use media_browser::{AppState, Config, MediaRoot};

#[derive(Parser, Debug)]
#[command(name = "media-browser")]
#[command(about = "Read-only web file browser for a media directory")]
#[command(version)]
struct Cli {
    /// Port to listen on
    #[arg(short, long, env = "MEDIA_BROWSER_PORT", default_value = "5000")]
    port: u16,

    /// Address to bind to
    #[arg(short, long, env = "MEDIA_BROWSER_BIND", default_value = "127.0.0.1")]
    bind: String,

    /// Root directory to serve files from
    #[arg(short, long, env = "MEDIA_BROWSER_ROOT", default_value = "media_files")]
    root: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, env = "MEDIA_BROWSER_VERBOSE")]
    verbose: bool,

    /// Config file path (optional)
    #[arg(short, long, env = "MEDIA_BROWSER_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "media_browser=debug,tower_http=debug"
    } else {
        "media_browser=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load config from file if provided, otherwise use defaults
    let config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        Config::default()
    };

    let root = MediaRoot::new(&cli.root).map_err(|err| {
        format!("Invalid root directory {}: {}", cli.root.display(), err)
    })?;

    info!("Serving files from: {}", root.path().display());

    let app = media_browser::app(AppState::with_config(root, config));

    // Start server
    let addr: SocketAddr = format!("{}:{}", cli.bind, cli.port).parse()?;
    info!("Starting media browser on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
