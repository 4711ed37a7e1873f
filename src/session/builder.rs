//! Session builder for configuration

use std::time::Duration;

use log::debug;
use regex::bytes::Regex;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::time::{self, Instant};

use crate::prompt::Prompts;
use crate::protocol::TelnetDecoder;
use crate::result::TelnetError;
use crate::scan::Scanner;
use crate::session::Session;

/// Default remote port.
const DEFAULT_PORT: u16 = 23;

/// Default read timeout (in seconds).
const DEFAULT_READ_TIMEOUT_SECS: u64 = 10;

/// Default fragment delimiter.
const DEFAULT_DELIMITER: u8 = b' ';

/// Builder for configuring and opening sessions.
///
/// Provides a fluent interface for configuring credentials, timeouts, the
/// fragment delimiter, and the prompt patterns. Configuration is immutable
/// once the session starts.
///
/// # Defaults
///
/// - Port: 23
/// - Read timeout: 10 seconds (connect timeout: none)
/// - Delimiter: a single space
/// - Prompt patterns: see [`Prompts`]
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use telnetrust::SessionBuilder;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let session = SessionBuilder::new()
///     .login("admin")
///     .password("secret")
///     .connect_timeout(Duration::from_secs(3))
///     .read_timeout(Duration::from_secs(30))
///     .connect("192.168.0.1")
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SessionBuilder {
    login: String,
    password: String,
    port: u16,
    connect_timeout: Option<Duration>,
    read_timeout: Duration,
    delimiter: u8,
    prompts: Prompts,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionBuilder {
    /// Create a builder with default configuration.
    pub fn new() -> Self {
        Self {
            login: String::new(),
            password: String::new(),
            port: DEFAULT_PORT,
            connect_timeout: None,
            read_timeout: Duration::from_secs(DEFAULT_READ_TIMEOUT_SECS),
            delimiter: DEFAULT_DELIMITER,
            prompts: Prompts::default(),
        }
    }

    /// Set the login submitted when a login prompt is seen.
    pub fn login(mut self, login: impl Into<String>) -> Self {
        self.login = login.into();
        self
    }

    /// Set the password submitted when a password prompt is seen.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    /// Set the remote port (default: 23).
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Bound the time spent establishing the TCP connection.
    ///
    /// Without one, [`connect`](Self::connect) waits as long as the
    /// operating system does.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the read timeout (default: 10 seconds).
    ///
    /// The deadline is computed once when the stream is attached and is not
    /// renewed per read or per command: it bounds the cumulative wall-clock
    /// time of all reads on the connection. Callers needing per-command
    /// budgets must reconnect between commands.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Set the fragment delimiter byte (default: a single space).
    ///
    /// The scanner hands the pending line to prompt detection each time this
    /// byte arrives; prompts that do not end in a space need a delimiter
    /// they do end with.
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Override the login prompt pattern.
    pub fn login_prompt(mut self, pattern: Regex) -> Self {
        self.prompts.login = pattern;
        self
    }

    /// Override the password prompt pattern.
    pub fn password_prompt(mut self, pattern: Regex) -> Self {
        self.prompts.password = pattern;
        self
    }

    /// Override the banner (shell prompt) pattern.
    ///
    /// The banner ends both the login handshake and each command's output,
    /// and is stripped from the output [`execute`](Session::execute)
    /// returns.
    pub fn shell_prompt(mut self, pattern: Regex) -> Self {
        self.prompts.banner = pattern;
        self
    }

    /// Connect over TCP and authenticate.
    ///
    /// Dials `address` on the configured port, then runs the login
    /// handshake: waits for the first banner, answering login and password
    /// prompts with the configured credentials on the way.
    pub async fn connect(self, address: &str) -> Result<Session<TcpStream>, TelnetError> {
        let endpoint = format!("{}:{}", address, self.port);
        debug!("trying to connect to {endpoint}");

        let stream = match self.connect_timeout {
            Some(limit) => time::timeout(limit, TcpStream::connect(&endpoint))
                .await
                .map_err(|_| TelnetError::ConnectTimeout { duration: limit })??,
            None => TcpStream::connect(&endpoint).await?,
        };

        self.attach(stream).await
    }

    /// Authenticate over an already-open duplex byte stream.
    ///
    /// This is the seam beneath [`connect`](Self::connect): the read
    /// deadline starts here, and the login handshake runs before the session
    /// is handed out. Useful when the transport is established elsewhere, or
    /// with in-memory streams in tests.
    pub async fn attach<S>(self, stream: S) -> Result<Session<S>, TelnetError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let (read_half, write_half) = tokio::io::split(stream);
        let deadline = Instant::now() + self.read_timeout;
        let decoder = TelnetDecoder::with_deadline(read_half, deadline, self.read_timeout);

        let mut session = Session::new(
            Scanner::new(decoder, self.delimiter),
            write_half,
            self.login,
            self.password,
            self.prompts,
        );

        debug!("waiting for the first banner");
        session.wait_welcome().await?;

        Ok(session)
    }
}
