//! Caddy route reconciler (v1)
//!
//! Polls the active domain records, renders them into a Caddyfile and pushes
//! the result to Caddy's admin API on a fixed interval.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌──────────────────────────────────────────────────────────┐
//!                 │                      ROUTE SYNC                          │
//!                 │                                                          │
//!   Postgres      │  ┌──────────┐   ┌────────────┐   ┌──────────────────┐    │   Caddy
//!   application_ ─┼─▶│  domain  │──▶│   render   │──▶│      proxy       │────┼─▶ POST /load
//!   domains       │  │  source  │   │ base+blocks│   │ format + push    │    │   text/caddyfile
//!                 │  └──────────┘   └────────────┘   └──────────────────┘    │
//!                 │        ▲                                  │              │
//!                 │        └──────── reconcile (tick) ◀───────┘              │
//!                 │                       ▲                                  │
//!                 │  ┌─────────┐  ┌───────┴────┐  ┌────────────┐             │
//!                 │  │ config  │  │ lifecycle  │  │observabil- │             │
//!                 │  │         │  │ signals    │  │ity         │             │
//!                 │  └─────────┘  └────────────┘  └────────────┘             │
//!                 └──────────────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

use route_sync::config::load_config;
use route_sync::lifecycle::signals::SignalListener;
use route_sync::lifecycle::{controller, startup, Exit, Shutdown};
use route_sync::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "route-sync")]
#[command(about = "Keeps Caddy routes in sync with active application domains", long_about = None)]
struct Args {
    /// Path to the TOML config file. Missing file means defaults + environment.
    #[arg(short, long, env = "CONFIG_PATH", default_value = "config.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(&args.config)?;

    logging::init(&config.observability)?;
    tracing::info!("route-sync v{} starting", env!("CARGO_PKG_VERSION"));

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let components = startup::build(&config)?;
    tracing::info!(
        interval = ?components.scheduler.interval(),
        "Configuring reload"
    );

    let signals = SignalListener::install()?;
    let shutdown = Shutdown::new();
    signals.spawn(shutdown.clone());

    let exit = controller::run(
        components.scheduler,
        shutdown,
        config.lifecycle.shutdown_grace(),
    )
    .await;

    match exit {
        Exit::Clean(summary) => {
            components.store.close().await;
            tracing::info!(ticks = summary.ticks, failures = summary.failures, "Shutdown complete");
            Ok(())
        }
        other => {
            tracing::warn!(exit = ?other, "Exiting without clean shutdown");
            std::process::exit(other.code());
        }
    }
}
