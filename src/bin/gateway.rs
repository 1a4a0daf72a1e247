use std::path::PathBuf;

use clap::Parser;

use mdb_lookup::config::{GatewayConfig, GatewaySettings};
use mdb_lookup::gateway;

/// HTTP gateway for the mdb-lookup service.
#[derive(Parser)]
#[command(name = "gateway")]
struct Args {
    /// Port to listen on for HTTP clients
    port: u16,
    /// Directory served for static file requests
    web_root: PathBuf,
    /// Host of the mdb-lookup server
    mdb_host: String,
    /// Port of the mdb-lookup server
    mdb_port: u16,
    /// YAML settings file (advertised host, client timeout)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Host name advertised in redirect links; overrides the settings file
    #[arg(long)]
    advertise: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => GatewaySettings::from_yaml(path)?,
        None => GatewaySettings::default(),
    };
    if args.advertise.is_some() {
        settings.advertised_host = args.advertise;
    }

    let cfg = GatewayConfig::new(
        args.port,
        args.web_root,
        args.mdb_host,
        args.mdb_port,
        settings,
    );

    tokio::select! {
        res = gateway::run(cfg) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
