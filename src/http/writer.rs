use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::StatusCode;

/// Every response goes out as HTTP/1.0 regardless of the request's version
/// token; the connection closes after each response.
const HTTP_VERSION: &str = "HTTP/1.0";

/// `HTTP/1.0 <code> <reason>\r\n`
pub async fn send_status_line<W>(w: &mut W, status: StatusCode) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        status.as_u16(),
        status.reason_phrase()
    );
    w.write_all(line.as_bytes()).await
}

/// Status line, blank line, and a minimal HTML error body.
pub async fn send_error<W>(w: &mut W, status: StatusCode) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    send_status_line(w, status).await?;
    w.write_all(b"\r\n").await?;

    let body = format!(
        "<html><body>\n<h1>{} {}</h1>\n</body></html>\n",
        status.as_u16(),
        status.reason_phrase()
    );
    w.write_all(body.as_bytes()).await
}

/// 301 response redirecting the browser to `uri` with a trailing slash
/// appended. The link is assembled from the configured advertised host, not
/// from ambient process state.
pub async fn send_redirect<W>(
    w: &mut W,
    advertised_host: &str,
    port: u16,
    uri: &str,
) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    send_status_line(w, StatusCode::MovedPermanently).await?;

    let target = format!("http://{}:{}{}/", advertised_host, port, uri);
    let page = format!(
        "Location: {target}\r\n\
         \r\n\
         <html><body>\n\
         <h1>301 Moved Permanently</h1>\n\
         <p>The document has moved <a href=\"{target}\">here</a>.</p>\n\
         </body></html>\n"
    );
    w.write_all(page.as_bytes()).await
}
