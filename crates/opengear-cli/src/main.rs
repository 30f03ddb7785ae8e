//! `opengear-report` binary.

use anyhow::{Context, Result};
use clap::Parser;
use opengear_api::OpengearClient;
use opengear_cli::{write_report, Cli, Settings};
use tracing::{info, warn};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = Settings::resolve(&cli)?;
    info!(host = %settings.appliance.host, "connecting to appliance");

    let client = OpengearClient::connect(settings.appliance, &settings.credentials)
        .context("Failed to connect to appliance")?;
    if !client.is_authenticated() {
        warn!("login failed, no data will be reported");
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_report(&client, &mut out)
}

/// Initialize tracing subscriber for logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
