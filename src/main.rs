//! Game Catalog CLI server
//!
//! ```sh
//! # Run with default config (~/.config/game-catalog/config.toml)
//! game-catalog
//!
//! # Custom config path
//! game-catalog --config /etc/game-catalog/config.toml
//!
//! # Keep the catalog in memory, on another port
//! game-catalog --memory --port 3000
//!
//! # Validate config without starting
//! game-catalog --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use game_catalog::config::{AppConfig, CONFIG_PATH_ENV};
use game_catalog::server::{init_tracing, ServerHandle, ServerOptions};

/// Game Catalog: REST service for a video game catalog.
#[derive(Parser, Debug)]
#[command(
    name = "game-catalog",
    version,
    about = "REST service for a catalog of video games",
    long_about = "Game Catalog: paginated REST API over a catalog of video games, \
                  backed by SQLite or process memory.\n\n\
                  Default config: ~/.config/game-catalog/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = CONFIG_PATH_ENV)]
    config: Option<PathBuf>,

    /// Override the listen address.
    #[arg(long)]
    host: Option<String>,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Keep the catalog in memory instead of SQLite.
    #[arg(long)]
    memory: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(game_catalog::default_config_path);

    let loaded = AppConfig::load(&config_path);
    let mut config = match &loaded {
        Ok(cfg) => cfg.clone(),
        Err(_) => AppConfig::default(),
    };

    // The log level override must be applied before tracing starts.
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config);

    let load_error = match loaded {
        Ok(_) => {
            info!("Configuration loaded from {}", config_path.display());
            None
        }
        Err(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
            Some(e)
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(host) = cli.host {
        info!("CLI override: host = {}", host);
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }
    if cli.memory {
        info!("CLI override: in_memory = true");
        config.database.in_memory = true;
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        if let Some(e) = load_error {
            return Err(e.into());
        }
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.server.address());
        if config.database.in_memory {
            println!("   Database    : in-memory");
        } else {
            println!("   Database    : {}", config.database.url);
        }
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await?;

    // Install OS signal handlers (SIGTERM, SIGINT)
    handle.install_signal_handler();

    info!("Press Ctrl+C to shutdown gracefully.");

    // Returns on a shutdown signal or when the API server exits on its own.
    handle.wait().await;

    Ok(())
}
