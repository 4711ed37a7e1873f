//! Session management for automated telnet interactions

mod builder;

pub use builder::SessionBuilder;

use log::debug;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, ReadHalf, WriteHalf};

use crate::prompt::Prompts;
use crate::result::TelnetError;
use crate::scan::{BannerPolicy, LoginPolicy, Scanner};

/// An authenticated interactive session.
///
/// A `Session` owns an open duplex byte stream exclusively: reads go through
/// the control-sequence decoder and prompt scanner, writes go straight to
/// the stream and are flushed immediately. By the time
/// [`SessionBuilder::connect`] or [`SessionBuilder::attach`] hands one out,
/// the login handshake has already completed.
///
/// # Examples
///
/// ```no_run
/// use telnetrust::SessionBuilder;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut session = SessionBuilder::new()
///     .login("admin")
///     .password("secret")
///     .connect("192.168.0.1")
///     .await?;
///
/// let output = session.execute("uname", &["-a"]).await?;
/// println!("{}", String::from_utf8_lossy(&output));
/// session.close().await?;
/// # Ok(())
/// # }
/// ```
pub struct Session<S> {
    scanner: Scanner<ReadHalf<S>>,
    writer: WriteHalf<S>,
    login: String,
    password: String,
    prompts: Prompts,
}

impl<S: AsyncRead + AsyncWrite + Unpin> Session<S> {
    pub(crate) fn new(
        scanner: Scanner<ReadHalf<S>>,
        writer: WriteHalf<S>,
        login: String,
        password: String,
        prompts: Prompts,
    ) -> Self {
        Self {
            scanner,
            writer,
            login,
            password,
            prompts,
        }
    }

    /// Wait for the first banner, answering any login and password prompts
    /// on the way. Called once right after the stream is attached.
    pub(crate) async fn wait_welcome(&mut self) -> Result<(), TelnetError> {
        let mut policy = LoginPolicy::new(&self.prompts, &self.login, &self.password);
        self.scanner
            .read_until_prompt(&mut self.writer, &mut policy)
            .await?;
        Ok(())
    }

    /// Send a command and return everything it printed before the shell
    /// prompt reappeared.
    ///
    /// Any bytes already buffered but unread (stale output from a previous
    /// round) are discarded first. The request sent on the wire is
    /// `name + " " + args.join(" ") + "\r\n"`. The returned output has every
    /// occurrence of the banner pattern removed and surrounding whitespace
    /// trimmed.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use telnetrust::SessionBuilder;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let mut session = SessionBuilder::new().connect("10.0.0.1").await?;
    /// let listing = session.execute("ls", &["-l", "/tmp"]).await?;
    /// let uptime = session.execute("uptime", &[]).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn execute(&mut self, name: &str, args: &[&str]) -> Result<Vec<u8>, TelnetError> {
        self.scanner.discard_buffered();

        let request = format!("{} {}\r\n", name, args.join(" "));
        debug!("send command: {}", request.trim_end());
        self.send(request.as_bytes()).await?;

        let output = self.read_until_banner().await?;
        debug!("received {} bytes of output", output.len());

        Ok(output)
    }

    /// Read until the banner (shell prompt) reappears, then strip the banner
    /// pattern from the output and trim surrounding whitespace.
    pub async fn read_until_banner(&mut self) -> Result<Vec<u8>, TelnetError> {
        let mut policy = BannerPolicy::new(&self.prompts.banner);
        let output = self
            .scanner
            .read_until_prompt(&mut self.writer, &mut policy)
            .await?;
        Ok(self.prompts.strip_banner(&output))
    }

    /// Send raw bytes to the remote and flush immediately.
    ///
    /// A write is never buffered across calls.
    pub async fn send(&mut self, data: &[u8]) -> Result<(), TelnetError> {
        self.writer.write_all(data).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Shut the connection down.
    pub async fn close(mut self) -> Result<(), TelnetError> {
        self.writer.shutdown().await?;
        Ok(())
    }
}
