//! Scan policies: per-fragment stop/continue decisions

use log::debug;
use regex::bytes::Regex;

use crate::prompt::Prompts;

/// Decision returned by a [`ScanPolicy`] for one fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanAction {
    /// Keep reading.
    Continue,
    /// Write these bytes back to the stream, then keep reading.
    Respond(Vec<u8>),
    /// Stop and return the accumulated output.
    Stop,
}

/// Per-fragment termination logic for [`Scanner`](crate::Scanner).
///
/// The policy receives only the current line's pending fragment (not the
/// whole output) on every delimiter boundary. Responses are returned as data
/// rather than written directly, which keeps policies independently
/// testable; the scanner performs the write.
///
/// Closures work too:
///
/// ```
/// use telnetrust::{ScanAction, ScanPolicy};
///
/// let mut policy = |fragment: &[u8]| {
///     if fragment.ends_with(b"> ") {
///         ScanAction::Stop
///     } else {
///         ScanAction::Continue
///     }
/// };
/// assert_eq!(policy.on_fragment(b"cli> "), ScanAction::Stop);
/// ```
pub trait ScanPolicy {
    /// Decide what to do after the given fragment arrived.
    fn on_fragment(&mut self, fragment: &[u8]) -> ScanAction;
}

impl<F> ScanPolicy for F
where
    F: FnMut(&[u8]) -> ScanAction,
{
    fn on_fragment(&mut self, fragment: &[u8]) -> ScanAction {
        (self)(fragment)
    }
}

/// Drives the post-connect handshake.
///
/// Answers login and password prompts with the configured credentials and
/// stops once the banner (shell prompt) appears. Checks run in login →
/// password → banner order; the first match short-circuits the rest for
/// that fragment. A failed credential submission is not retried.
pub struct LoginPolicy<'a> {
    prompts: &'a Prompts,
    login: &'a str,
    password: &'a str,
}

impl<'a> LoginPolicy<'a> {
    /// Create a login policy over the given prompt set and credentials.
    pub fn new(prompts: &'a Prompts, login: &'a str, password: &'a str) -> Self {
        Self {
            prompts,
            login,
            password,
        }
    }
}

impl ScanPolicy for LoginPolicy<'_> {
    fn on_fragment(&mut self, fragment: &[u8]) -> ScanAction {
        if self.prompts.login.is_match(fragment) {
            debug!("found login prompt");
            ScanAction::Respond(credential_reply(self.login))
        } else if self.prompts.password.is_match(fragment) {
            debug!("found password prompt");
            ScanAction::Respond(credential_reply(self.password))
        } else if self.prompts.banner.is_match(fragment) {
            ScanAction::Stop
        } else {
            ScanAction::Continue
        }
    }
}

/// Stops as soon as the fragment contains a banner match. Used to capture
/// command output: everything up to the shell prompt's reappearance.
pub struct BannerPolicy<'a> {
    banner: &'a Regex,
}

impl<'a> BannerPolicy<'a> {
    /// Create a banner policy over the given shell-prompt pattern.
    pub fn new(banner: &'a Regex) -> Self {
        Self { banner }
    }
}

impl ScanPolicy for BannerPolicy<'_> {
    fn on_fragment(&mut self, fragment: &[u8]) -> ScanAction {
        if self.banner.is_match(fragment) {
            ScanAction::Stop
        } else {
            ScanAction::Continue
        }
    }
}

fn credential_reply(value: &str) -> Vec<u8> {
    let mut reply = Vec::with_capacity(value.len() + 2);
    reply.extend_from_slice(value.as_bytes());
    reply.extend_from_slice(b"\r\n");
    reply
}
