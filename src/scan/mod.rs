//! Incremental prompt scanning over the decoded payload stream
//!
//! The remote never terminates a prompt with a fixed record marker, so the
//! scanner reads delimiter-bounded fragments, reconstructs the current
//! pending line across fragments, and asks a [`ScanPolicy`] after each
//! fragment whether to keep reading.

mod policy;

pub use policy::{BannerPolicy, LoginPolicy, ScanAction, ScanPolicy};

use bytes::{BufMut, BytesMut};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

use crate::protocol::TelnetDecoder;
use crate::result::TelnetError;

/// Initial capacity of the output accumulator for one read operation.
const OUTPUT_CAPACITY: usize = 64 * 1024;

/// Reads payload fragments and feeds the current pending line to a policy.
pub struct Scanner<R> {
    decoder: TelnetDecoder<R>,
    delimiter: u8,
}

impl<R: AsyncRead + Unpin> Scanner<R> {
    /// Create a scanner splitting fragments on `delimiter`.
    pub fn new(decoder: TelnetDecoder<R>, delimiter: u8) -> Self {
        Self { decoder, delimiter }
    }

    /// Append payload bytes to `output` until the delimiter is read.
    ///
    /// The delimiter byte is included in the output. Returns the number of
    /// bytes appended by this call.
    pub async fn read_until(&mut self, output: &mut BytesMut) -> Result<usize, TelnetError> {
        let mut appended = 0;
        loop {
            let b = self.decoder.read_byte().await?;
            output.put_u8(b);
            appended += 1;
            if b == self.delimiter {
                return Ok(appended);
            }
        }
    }

    /// Read fragments until `policy` stops the scan, returning the full
    /// accumulated output.
    ///
    /// After each fragment the policy sees the current pending line, i.e.
    /// everything after the most recent `\n\r` line boundary. A
    /// [`ScanAction::Respond`] reply is written to `writer` (flushed)
    /// before scanning continues.
    ///
    /// There is no bound on attempts or bytes: a policy that never stops
    /// blocks until the read deadline fires.
    pub async fn read_until_prompt<W, P>(
        &mut self,
        writer: &mut W,
        policy: &mut P,
    ) -> Result<BytesMut, TelnetError>
    where
        W: AsyncWrite + Unpin,
        P: ScanPolicy + ?Sized,
    {
        let mut output = BytesMut::with_capacity(OUTPUT_CAPACITY);
        let mut line_start = 0;
        let mut end = 0;

        loop {
            end += self.read_until(&mut output).await?;

            if let Some(start) = find_line_start(&output) {
                line_start = start;
            }

            match policy.on_fragment(&output[line_start..end]) {
                ScanAction::Stop => return Ok(output),
                ScanAction::Respond(reply) => {
                    writer.write_all(&reply).await?;
                    writer.flush().await?;
                }
                ScanAction::Continue => {}
            }
        }
    }

    /// Drop client-side buffered payload without blocking.
    pub fn discard_buffered(&mut self) {
        self.decoder.discard_buffered();
    }
}

/// Offset where the newest visual line begins: one past the most recent
/// `\n\r` pair, or `None` if the buffer contains no such pair.
///
/// These remotes emit a bare `\n` mid-stream and a `\r` as part of the next
/// line's prompt redraw, so the newest line starts after `\n\r` — not after
/// the conventional `\r\n`. The search runs backward because a forward
/// search would pick the wrong boundary when several newlines are present.
pub(crate) fn find_line_start(data: &[u8]) -> Option<usize> {
    data.windows(2)
        .rposition(|pair| pair[0] == b'\n' && pair[1] == b'\r')
        .map(|at| at + 2)
}
