//! Static-file serving: every URI the bridge does not claim.

use tokio::fs;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::config::GatewayConfig;
use crate::http::response::StatusCode;
use crate::http::writer;

/// Serves `web_root + uri` and returns the status for the access log.
///
/// A URI ending in `/` gets `index.html` appended before the path is
/// checked. Directories redirect with 301; anything that will not open is
/// 404. The URI has already passed traversal validation.
pub async fn serve<W>(cfg: &GatewayConfig, uri: &str, client: &mut W) -> StatusCode
where
    W: AsyncWrite + Unpin,
{
    let mut path = format!("{}{}", cfg.web_root.display(), uri);
    if path.ends_with('/') {
        path.push_str("index.html");
    }

    if let Ok(md) = fs::metadata(&path).await {
        if md.is_dir() {
            let status = StatusCode::MovedPermanently;
            let sent =
                writer::send_redirect(client, &cfg.advertised_host, cfg.listen_port, uri).await;
            if let Err(e) = sent {
                debug!("send failed: {}", e);
            }
            return status;
        }
    }

    let mut file = match fs::File::open(&path).await {
        Ok(f) => f,
        Err(_) => {
            let status = StatusCode::NotFound;
            if let Err(e) = writer::send_error(client, status).await {
                debug!("send failed: {}", e);
            }
            return status;
        }
    };

    let status = StatusCode::Ok;
    if writer::send_status_line(client, status).await.is_err() {
        return status;
    }
    if client.write_all(b"\r\n").await.is_err() {
        return status;
    }

    // status already committed; a client that goes away mid-file just
    // truncates the stream
    if let Err(e) = tokio::io::copy(&mut file, client).await {
        debug!("file stream aborted: {}", e);
    }

    status
}
