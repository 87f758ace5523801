//! Request logger demo server.
//!
//! Serves an echo handler wrapped in the request logging middleware, with
//! every completed, panicked and slow request reported through `tracing`.
//!
//! ```text
//! request-logger --config request-logger.toml
//! curl -H 'x-delay-ms: 2500' localhost:8080/slow   # slow request reports
//! curl localhost:8080/panic                          # panic report
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use request_logger::config::{load_config, ServerConfig};
use request_logger::http::{EchoHandler, HttpServer};
use request_logger::lifecycle::{shutdown_on_ctrl_c, Shutdown};
use request_logger::observability::{init_logging, TracingLogger};
use request_logger::wrap;

#[derive(Parser)]
#[command(name = "request-logger")]
#[command(about = "Echo server demonstrating the request logging middleware", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability)?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        slow_cutoff_ms = config.slow_requests.cutoff_ms,
        slow_repeat = config.slow_requests.repeat,
        log_failures = config.observability.log_failures,
        "Configuration loaded"
    );

    let logger = Arc::new(TracingLogger::from_config(
        &config.slow_requests,
        &config.observability,
    ));
    let handler = wrap(EchoHandler, logger);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    tokio::spawn(shutdown_on_ctrl_c(shutdown.clone()));

    HttpServer::new(handler).run(listener, shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
