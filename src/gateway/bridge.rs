//! Bridges `/mdb-lookup` HTTP requests onto the back-end line protocol.
//!
//! The bridge holds the gateway's one connection to the lookup server,
//! opened at startup and reused by every client request. The line protocol
//! carries no request IDs, so queries must stay strictly request/response
//! ordered on this connection.

use anyhow::Context;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tracing::{debug, error, info};

use crate::http::response::StatusCode;
use crate::http::writer;
use crate::lineio::{MAX_LINE, read_line_lossy};

const KEY_PREFIX: &str = "/mdb-lookup?key=";

const FORM: &str = "<html><center><body>\n\
                    <h1>mdb-lookup</h1>\n\
                    <p>\n\
                    <form method=GET action=/mdb-lookup>\n\
                    lookup: <input type=text name=key>\n\
                    <input type=submit>\n\
                    </form>\n\
                    <p>\n";

const TABLE_HEADER: &str = "<p><table border>";
const TABLE_FOOTER: &str = "\n</table>\n";
const PAGE_FOOTER: &str = "</body></center></html>\n";

const ROW_ODD: &str = "\n<tr><td bgcolor=#acbcc2>";
const ROW_EVEN: &str = "\n<tr><td bgcolor=#8facb8>";

pub struct LookupBridge {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl LookupBridge {
    /// Connects to the lookup server. Failure here is a startup failure;
    /// the caller treats it as fatal.
    pub async fn connect(host: &str, port: u16) -> anyhow::Result<Self> {
        let stream = TcpStream::connect((host, port))
            .await
            .with_context(|| format!("failed to connect to {}:{}", host, port))?;
        let (rd, wr) = stream.into_split();

        Ok(Self {
            reader: BufReader::new(rd),
            writer: wr,
        })
    }

    /// Handles a routed `/mdb-lookup` URI and returns the status for the
    /// access log.
    ///
    /// Only `/mdb-lookup?key=...` triggers a back-end query; the bare path
    /// (or any other query string) gets the search form alone.
    pub async fn handle<W>(&mut self, uri: &str, client: &mut W) -> StatusCode
    where
        W: AsyncWrite + Unpin,
    {
        match uri.strip_prefix(KEY_PREFIX) {
            Some(key) => self.lookup(key, client).await,
            None => form_only(client).await,
        }
    }

    async fn lookup<W>(&mut self, key: &str, client: &mut W) -> StatusCode
    where
        W: AsyncWrite + Unpin,
    {
        info!("looking up [{}]", key);

        // The key goes over the wire verbatim, URL encoding and all; the
        // lookup server does its own clamping.
        let sent = async {
            self.writer.write_all(key.as_bytes()).await?;
            self.writer.write_all(b"\n").await
        }
        .await;

        if let Err(e) = sent {
            error!("mdb-lookup-server connection failed: {}", e);
            let status = StatusCode::InternalServerError;
            if let Err(e) = writer::send_error(client, status).await {
                debug!("send failed: {}", e);
            }
            return status;
        }

        // The status is committed from here on; any failure below only
        // truncates the page.
        let status = StatusCode::Ok;

        if writer::send_status_line(client, status).await.is_err() {
            return status;
        }
        if client.write_all(b"\r\n").await.is_err() {
            return status;
        }
        if client.write_all(FORM.as_bytes()).await.is_err() {
            return status;
        }
        if client.write_all(TABLE_HEADER.as_bytes()).await.is_err() {
            return status;
        }

        let mut row = 0usize;
        loop {
            let line = match read_line_lossy(&mut self.reader, MAX_LINE).await {
                Ok(Some(line)) => line,
                Ok(None) => {
                    error!("mdb-lookup-server connection terminated");
                    return status;
                }
                Err(e) => {
                    error!("mdb-lookup-server connection failed: {}", e);
                    return status;
                }
            };

            // end-of-result sentinel
            if line == "\n" {
                break;
            }

            let prefix = if row % 2 == 0 { ROW_ODD } else { ROW_EVEN };
            row += 1;

            if client.write_all(prefix.as_bytes()).await.is_err() {
                return status;
            }
            if client.write_all(line.as_bytes()).await.is_err() {
                return status;
            }
        }

        if client.write_all(TABLE_FOOTER.as_bytes()).await.is_err() {
            return status;
        }
        let _ = client.write_all(PAGE_FOOTER.as_bytes()).await;

        status
    }
}

async fn form_only<W>(client: &mut W) -> StatusCode
where
    W: AsyncWrite + Unpin,
{
    let status = StatusCode::Ok;

    if writer::send_status_line(client, status).await.is_err() {
        return status;
    }
    if client.write_all(b"\r\n").await.is_err() {
        return status;
    }
    if client.write_all(FORM.as_bytes()).await.is_err() {
        return status;
    }
    let _ = client.write_all(PAGE_FOOTER.as_bytes()).await;

    status
}
