use std::path::PathBuf;

use clap::Parser;

use mdb_lookup::config::LookupConfig;
use mdb_lookup::lookup;

/// Record-lookup server for the message database.
#[derive(Parser)]
#[command(name = "lookupd")]
struct Args {
    /// Message database file
    db_file: PathBuf,
    /// Port to listen on
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let args = Args::parse();

    let cfg = LookupConfig {
        db_file: args.db_file,
        listen_port: args.port,
    };

    tokio::select! {
        res = lookup::server::run(cfg) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
