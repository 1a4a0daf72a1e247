//! Bounded line reads shared by the gateway and the lookup server.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

/// Longest line either server takes in one read. Longer input comes back in
/// chunks of this size, each handled as its own line.
pub const MAX_LINE: usize = 1000;

/// Reads one line, terminator included, decoding lossily.
///
/// Returns `Ok(None)` at end of input.
pub async fn read_line_lossy<R>(reader: &mut R, max: usize) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut raw = Vec::new();
    let mut limited = (&mut *reader).take(max as u64);
    let n = limited.read_until(b'\n', &mut raw).await?;

    if n == 0 {
        return Ok(None);
    }

    Ok(Some(String::from_utf8_lossy(&raw).into_owned()))
}
