//! Error types for telnet session operations

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while driving a telnet session.
///
/// Transport errors are always fatal to the in-progress operation: they are
/// propagated unchanged to the caller and never retried internally. There is
/// no partial-result recovery; a failed read operation discards whatever
/// output had been accumulated for that call.
///
/// # Examples
///
/// ```no_run
/// use telnetrust::{SessionBuilder, TelnetError};
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let result = SessionBuilder::new()
///     .login("admin")
///     .password("secret")
///     .read_timeout(Duration::from_secs(5))
///     .connect("192.168.0.1")
///     .await;
///
/// match result {
///     Ok(_session) => println!("authenticated"),
///     Err(TelnetError::Timeout { duration }) => {
///         eprintln!("no shell prompt within {:?}", duration);
///     }
///     Err(e) => return Err(e.into()),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Error, Debug)]
pub enum TelnetError {
    /// Read deadline exceeded.
    ///
    /// The deadline is an absolute instant fixed when the stream is attached
    /// and is not renewed per read, so this also fires when the remote never
    /// produces a prompt that satisfies the current scan policy.
    #[error("timeout waiting for remote data (read deadline {duration:?})")]
    Timeout {
        /// The configured read timeout the deadline was derived from.
        duration: Duration,
    },

    /// Connecting to the remote endpoint took longer than the configured
    /// connect timeout.
    #[error("connect timed out after {duration:?}")]
    ConnectTimeout {
        /// The configured connect timeout.
        duration: Duration,
    },

    /// Transport error.
    ///
    /// Connect failure, read/write failure, or end of stream before the
    /// current scan policy was satisfied.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
