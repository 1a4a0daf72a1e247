//! The HTTP gateway: accept loop, request state machine, routing, access
//! log.
//!
//! Connections are handled one at a time, fully, before the next accept.
//! The bridge's single back-end connection carries no request correlation,
//! so requests must never interleave; a task-per-connection variant would
//! need one back-end connection per worker or a serialized multiplexer in
//! front of the one it has.

pub mod bridge;
pub mod files;

use std::net::Ipv4Addr;

use anyhow::Context;
use tokio::io::{AsyncBufRead, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tracing::{info, warn};

use crate::config::GatewayConfig;
use crate::http::parser;
use crate::http::request::RequestLine;
use crate::http::response::StatusCode;
use crate::http::writer;
use crate::lineio::{MAX_LINE, read_line_lossy};
use self::bridge::LookupBridge;

pub struct Gateway {
    cfg: GatewayConfig,
    bridge: LookupBridge,
}

/// Connects to the lookup back end, binds the listen port, and serves
/// forever. Either failure is fatal.
pub async fn run(cfg: GatewayConfig) -> anyhow::Result<()> {
    let bridge = LookupBridge::connect(&cfg.backend_host, cfg.backend_port).await?;

    let listener = TcpListener::bind((Ipv4Addr::UNSPECIFIED, cfg.listen_port))
        .await
        .context("bind failed")?;
    info!("listening on {}", listener.local_addr()?);

    Gateway::new(cfg, bridge).serve(listener).await
}

impl Gateway {
    pub fn new(cfg: GatewayConfig, bridge: LookupBridge) -> Self {
        Self { cfg, bridge }
    }

    /// Sequential accept loop. Every connection ends in exactly one access
    /// log line: client address, request line, status, reason.
    pub async fn serve(mut self, listener: TcpListener) -> anyhow::Result<()> {
        loop {
            let (mut stream, peer) = listener.accept().await.context("accept failed")?;

            let (req, status) = self.handle_client(&mut stream).await;

            info!(
                "{} \"{} {} {}\" {} {}",
                peer.ip(),
                req.method,
                req.uri,
                req.version,
                status.as_u16(),
                status.reason_phrase()
            );
        }
    }

    async fn handle_client(&mut self, stream: &mut TcpStream) -> (RequestLine, StatusCode) {
        let (rd, mut wr) = stream.split();
        let mut reader = BufReader::new(rd);

        let req = match self.read_request(&mut reader).await {
            Ok(req) => req,
            Err((req, status)) => {
                if let Err(e) = writer::send_error(&mut wr, status).await {
                    warn!("send failed: {}", e);
                }
                return (req, status);
            }
        };

        let status = if req.uri == "/mdb-lookup" || req.uri.starts_with("/mdb-lookup?") {
            self.bridge.handle(&req.uri, &mut wr).await
        } else {
            files::serve(&self.cfg, &req.uri, &mut wr).await
        };

        (req, status)
    }

    /// Reads and validates the request line, then discards header lines up
    /// to the terminating blank line. The whole read phase shares one
    /// deadline when one is configured; expiry maps to 400 like any other
    /// unreadable request.
    async fn read_request<R>(
        &self,
        reader: &mut R,
    ) -> Result<RequestLine, (RequestLine, StatusCode)>
    where
        R: AsyncBufRead + Unpin,
    {
        let read = read_request_inner(reader);

        match self.cfg.client_timeout {
            Some(limit) => match timeout(limit, read).await {
                Ok(res) => res,
                Err(_) => Err((RequestLine::default(), StatusCode::BadRequest)),
            },
            None => read.await,
        }
    }
}

async fn read_request_inner<R>(reader: &mut R) -> Result<RequestLine, (RequestLine, StatusCode)>
where
    R: AsyncBufRead + Unpin,
{
    let line = match read_line_lossy(reader, MAX_LINE).await {
        Ok(Some(line)) => line,
        Ok(None) | Err(_) => {
            return Err((RequestLine::default(), StatusCode::BadRequest));
        }
    };

    let req = RequestLine::parse(&line);
    if let Err(e) = parser::validate(&req) {
        return Err((req, e.status()));
    }

    // headers are read and discarded; the blank line is still required
    loop {
        match read_line_lossy(reader, MAX_LINE).await {
            Ok(Some(line)) if line == "\r\n" || line == "\n" => break,
            Ok(Some(_)) => {}
            Ok(None) | Err(_) => {
                return Err((req, StatusCode::BadRequest));
            }
        }
    }

    Ok(req)
}
