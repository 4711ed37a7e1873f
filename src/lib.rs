//! telnetrust: automated interactive telnet sessions
//!
//! telnetrust drives an interactive terminal session over the legacy telnet
//! protocol: it opens a connection, strips the protocol's in-band control
//! sequences from the byte stream, recognizes textual prompts (login,
//! password, shell prompt) by pattern, supplies credentials automatically,
//! and lets a caller issue a command and receive exactly the output produced
//! before the next shell prompt reappears.
//!
//! # Features
//!
//! - **Control-sequence stripping**: option-negotiation commands and
//!   subnegotiation blocks are discarded byte-exactly, never answered
//! - **Incremental prompt detection**: prompts are free-form text with no
//!   fixed terminator; the scanner reconstructs the current pending line
//!   across delimiter-bounded fragments as data arrives
//! - **Automatic login**: login and password prompts are answered with the
//!   configured credentials until the shell prompt appears
//! - **Command capture**: [`Session::execute`] returns a command's output
//!   with the shell prompt stripped and surrounding whitespace trimmed
//! - **Single read deadline**: the deadline is fixed when the stream is
//!   attached, so a session that never reaches the next prompt fails
//!   instead of hanging forever
//!
//! # Quick Start
//!
//! ```no_run
//! use std::time::Duration;
//! use telnetrust::SessionBuilder;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut session = SessionBuilder::new()
//!         .login("admin")
//!         .password("secret")
//!         .read_timeout(Duration::from_secs(10))
//!         .connect("192.168.0.1")
//!         .await?;
//!
//!     let output = session.execute("ls", &["-l"]).await?;
//!     println!("{}", String::from_utf8_lossy(&output));
//!
//!     session.close().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Prompt patterns
//!
//! Prompt recognition is regex-based over raw payload bytes. The defaults
//! match a typical Linux telnet daemon; all three patterns and the fragment
//! delimiter can be overridden for other remotes:
//!
//! ```no_run
//! use regex::bytes::Regex;
//! use telnetrust::SessionBuilder;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = SessionBuilder::new()
//!     .login("admin")
//!     .password("secret")
//!     .shell_prompt(Regex::new(r"switch> ")?)
//!     .connect("10.0.0.5")
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Sending raw data
//!
//! [`Session::send`] writes bytes to the remote and flushes immediately,
//! for interactions that do not fit the command/prompt round trip:
//!
//! ```no_run
//! # use telnetrust::SessionBuilder;
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! # let mut session = SessionBuilder::new().connect("10.0.0.5").await?;
//! session.send(b"\x03").await?; // Ctrl-C
//! # Ok(())
//! # }
//! ```
//!
//! # Scope
//!
//! telnetrust is not a protocol-option negotiator (it never answers WILL/DO)
//! and not a terminal emulator (no screen or cursor model). Operations are
//! sequential on one connection; there is no internal concurrency.

#![warn(missing_docs)]

mod prompt;
pub mod protocol;
mod result;
mod scan;
mod session;

pub use prompt::Prompts;
pub use protocol::TelnetDecoder;
pub use result::TelnetError;
pub use scan::{BannerPolicy, LoginPolicy, ScanAction, ScanPolicy, Scanner};
pub use session::{Session, SessionBuilder};
