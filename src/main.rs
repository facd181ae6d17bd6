mod cli;
mod commands;
mod scan;

use clap::Parser;
use tracing::error;

use cookiescan_core::ScanConfig;

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Scan {
            start_url,
            output,
            session_cookie_name,
            session_cookie_value,
            max_links,
            max_lookups,
            debug,
        } => {
            let config = ScanConfig {
                start_url,
                output_prefix: output,
                session_cookie_name,
                session_cookie_value,
                max_links,
                max_lookups,
                debug,
            };
            scan::run_scan(config).await
        }
        Commands::Clean { output } => commands::clean::run(&output),
    };

    if let Err(e) = result {
        error!(error = %e, "cookie scan failed");
        std::process::exit(1);
    }
}
