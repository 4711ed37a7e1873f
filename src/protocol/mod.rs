//! Telnet control-sequence decoding
//!
//! The remote interleaves in-band control sequences with payload bytes.
//! [`TelnetDecoder`] removes them: option-negotiation commands are discarded
//! (never answered) and subnegotiation blocks are skipped wholesale, so
//! callers above only ever see payload.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};
use tokio::time::{self, Instant};

use crate::result::TelnetError;

/// Interpret As Command: prefix byte of every control sequence.
pub const IAC: u8 = 255;
/// Subnegotiation of the indicated option follows.
pub const SB: u8 = 250;
/// End of subnegotiation parameters.
pub const SE: u8 = 240;
/// Indicates the desire to begin performing an option.
pub const WILL: u8 = 251;
/// Indicates the refusal to perform the indicated option.
pub const WONT: u8 = 252;
/// Requests that the other party perform the indicated option.
pub const DO: u8 = 253;
/// Demands that the other party stop performing the indicated option.
pub const DONT: u8 = 254;

/// Decodes the raw connection stream into payload bytes.
///
/// Wraps the read half of the connection in a buffered reader and exposes a
/// single operation, [`read_byte`](TelnetDecoder::read_byte), which
/// transparently consumes and discards any control sequence encountered
/// before the next payload byte.
///
/// Every raw read honors the decoder's absolute deadline: the deadline is
/// fixed once at construction and never refreshed, so the cumulative
/// wall-clock budget for all reads on a connection is bounded by it.
pub struct TelnetDecoder<R> {
    reader: BufReader<R>,
    deadline: Option<Instant>,
    read_timeout: Duration,
}

impl<R: AsyncRead + Unpin> TelnetDecoder<R> {
    /// Create a decoder with no read deadline.
    pub fn new(inner: R) -> Self {
        Self {
            reader: BufReader::new(inner),
            deadline: None,
            read_timeout: Duration::ZERO,
        }
    }

    /// Create a decoder whose reads all fail once `deadline` has passed.
    ///
    /// `read_timeout` is only carried for error reporting; the deadline
    /// itself is the absolute instant.
    pub fn with_deadline(inner: R, deadline: Instant, read_timeout: Duration) -> Self {
        Self {
            reader: BufReader::new(inner),
            deadline: Some(deadline),
            read_timeout,
        }
    }

    /// Receive the next payload byte, skipping control sequences.
    pub async fn read_byte(&mut self) -> Result<u8, TelnetError> {
        loop {
            let b = self.next_byte().await?;
            if b != IAC {
                return Ok(b);
            }
            self.skip_command().await?;
        }
    }

    /// Drop whatever payload is already sitting in the read buffer without
    /// blocking. Used to shed stale server output before sending a command.
    pub fn discard_buffered(&mut self) {
        let buffered = self.reader.buffer().len();
        self.reader.consume(buffered);
    }

    /// Next raw byte from the stream, honoring the deadline.
    async fn next_byte(&mut self) -> Result<u8, TelnetError> {
        match self.deadline {
            Some(deadline) => match time::timeout_at(deadline, self.reader.read_u8()).await {
                Ok(result) => result.map_err(TelnetError::Io),
                Err(_) => Err(TelnetError::Timeout {
                    duration: self.read_timeout,
                }),
            },
            None => self.reader.read_u8().await.map_err(TelnetError::Io),
        }
    }

    /// Skip the control sequence following an already-consumed IAC.
    ///
    /// Unrecognized commands discard only the command byte itself, i.e. the
    /// whole sequence is treated as a 2-byte command.
    async fn skip_command(&mut self) -> Result<(), TelnetError> {
        match self.next_byte().await? {
            WILL | WONT | DO | DONT => {
                // One option byte follows.
                self.next_byte().await?;
            }
            SB => self.skip_subnegotiation().await?,
            _ => {}
        }
        Ok(())
    }

    /// Discard bytes until the adjacent pair (IAC, SE) terminates the block.
    /// A block that never closes keeps reading until the deadline fires.
    async fn skip_subnegotiation(&mut self) -> Result<(), TelnetError> {
        let mut previous = 0u8;
        loop {
            let b = self.next_byte().await?;
            if previous == IAC && b == SE {
                return Ok(());
            }
            previous = b;
        }
    }
}
