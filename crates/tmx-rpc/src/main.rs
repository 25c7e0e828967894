//! tmx-rpc - JSON-RPC backend for Electron IPC.
//!
//! This binary serves a [`tmx_core::Orchestrator`] over JSON-RPC 2.0 for
//! communication with the Electron main process.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tmx_core::{AcquisitionConfig, LogOptions, Orchestrator};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "tmx-rpc")]
#[command(about = "JSON-RPC server for the Trackmania map viewer")]
struct Args {
    /// Port to listen on (0 = auto-assign)
    #[arg(short, long, default_value = "0")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Game executable used by the download-then-launch strategy
    #[arg(long)]
    exe_path: Option<PathBuf>,

    /// Directory downloaded maps are cached in
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Base URL maps are downloaded from; the map id is appended
    #[arg(long)]
    map_url_base: Option<String>,

    /// Abort map downloads after this many seconds (default: no timeout)
    #[arg(long)]
    fetch_timeout_secs: Option<u64>,

    /// Log file (default: <temp>/trackmania-viewer.log)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn acquisition_config(&self) -> AcquisitionConfig {
        let mut config = AcquisitionConfig::default()
            .with_fetch_timeout(self.fetch_timeout_secs.map(Duration::from_secs));
        if let Some(path) = &self.exe_path {
            config = config.with_executable_path(path);
        }
        if let Some(dir) = &self.cache_dir {
            config = config.with_cache_dir(dir);
        }
        if let Some(base) = &self.map_url_base {
            config = config.with_map_url_base(base.as_str());
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Held until exit so buffered log lines reach the file
    let _log_guard = tmx_core::logging::init(LogOptions {
        debug: args.debug,
        log_file: args.log_file.clone(),
    })?;

    info!("Starting tmx RPC server");

    let config = args.acquisition_config();
    info!("Cache dir: {}", config.cache_dir.display());
    info!("Executable: {}", config.executable_path.display());

    let orchestrator = Arc::new(Orchestrator::new(config)?);

    let addr = tmx_rpc::start_server(orchestrator, &args.host, args.port).await?;

    // Print port for Electron to read (intentional stdout for IPC)
    println!("RPC_PORT={}", addr.port());

    info!("RPC server running on {}", addr);

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received, exiting");

    Ok(())
}
