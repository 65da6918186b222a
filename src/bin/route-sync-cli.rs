use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use route_sync::config::load_config;
use route_sync::lifecycle::startup;
use route_sync::proxy::caddyfile;

#[derive(Parser)]
#[command(name = "route-sync-cli")]
#[command(about = "Operator CLI for the Caddy route reconciler", long_about = None)]
struct Cli {
    #[arg(short, long, env = "CONFIG_PATH", default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the current Caddyfile from the database without pushing it
    Render,
    /// Run a single reconciliation tick and report the outcome
    Apply,
    /// Canonicalize a Caddyfile and print it
    Fmt {
        /// File to format
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fmt { path } => {
            let raw = std::fs::read_to_string(&path)?;
            match caddyfile::format(&raw) {
                Ok(formatted) => {
                    print!("{formatted}");
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    eprintln!("Error: {}: {}", path.display(), e);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Render => {
            let config = load_config(&cli.config)?;
            let (reconciler, store) = startup::build_reconciler(&config)?;
            let result = reconciler.build_document().await;
            store.close().await;

            let (document, domains) = result?;
            let formatted = caddyfile::format(&document)?;
            eprintln!("# {domains} active domain(s)");
            print!("{formatted}");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Apply => {
            let config = load_config(&cli.config)?;
            let (reconciler, store) = startup::build_reconciler(&config)?;
            let outcome = reconciler.tick(1).await;
            store.close().await;

            match outcome.result {
                Ok(report) => {
                    println!(
                        "Applied {} domain(s), proxy answered {}",
                        outcome.domains.unwrap_or_default(),
                        report.status
                    );
                    if !report.body.is_empty() {
                        println!("Response: {}", report.body);
                    }
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    eprintln!("Error: {} stage failed: {}", e.stage(), e);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}
