//! The line-oriented lookup protocol server.
//!
//! One key per line in; zero or more formatted match lines plus a single
//! blank line out, per key. The blank line is the only framing marker the
//! protocol has.

use std::net::Ipv4Addr;
use std::path::Path;

use anyhow::Context;
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tracing::{info, warn};

use crate::config::LookupConfig;
use crate::lineio::{MAX_LINE, read_line_lossy};
use crate::lookup::query::{clamp_key, format_match, query};
use crate::lookup::store::RecordStore;

pub async fn run(cfg: LookupConfig) -> anyhow::Result<()> {
    let listener = TcpListener::bind((Ipv4Addr::UNSPECIFIED, cfg.listen_port))
        .await
        .context("bind failed")?;
    info!("listening on {}", listener.local_addr()?);

    serve(listener, cfg).await
}

/// Accept loop, one connection at a time.
///
/// Only a database reload failure ends the process; client I/O trouble
/// ends just that connection.
pub async fn serve(listener: TcpListener, cfg: LookupConfig) -> anyhow::Result<()> {
    loop {
        let (stream, peer) = listener.accept().await.context("accept failed")?;
        info!("connection started from: {}", peer.ip());

        serve_connection(stream, &cfg.db_file).await?;

        info!("connection terminated from: {}", peer.ip());
    }
}

async fn serve_connection(mut stream: TcpStream, db_file: &Path) -> anyhow::Result<()> {
    // The database is reloaded for every client, so edits to the file show
    // up in the next session.
    let store = RecordStore::load(db_file)
        .await
        .with_context(|| format!("failed to load {}", db_file.display()))?;

    let (rd, mut wr) = stream.split();
    let mut reader = BufReader::new(rd);

    loop {
        let line = match read_line_lossy(&mut reader, MAX_LINE).await {
            Ok(Some(line)) => line,
            // clean half-close from the client
            Ok(None) => break,
            Err(e) => {
                // nothing was read, so there is nothing to answer
                warn!("failed to read key: {}", e);
                break;
            }
        };

        let key = clamp_key(&line);

        for (index, record) in query(&store, key) {
            let row = format_match(index, record);
            if let Err(e) = wr.write_all(row.as_bytes()).await {
                warn!("send failed: {}", e);
                // drop the rest of this result set, keep the connection
                break;
            }
        }

        // the sentinel goes out even after a failed row write
        if let Err(e) = wr.write_all(b"\n").await {
            warn!("send failed: {}", e);
        }
    }

    Ok(())
}
