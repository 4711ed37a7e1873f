//! Prompt patterns for login, password, and shell-prompt detection
//!
//! Patterns are byte regexes because they run against raw payload fragments
//! that may carry stray control characters and need not be valid UTF-8.

use once_cell::sync::Lazy;
use regex::bytes::Regex;

static DEFAULT_LOGIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\w-]+ login:").expect("default login prompt pattern"));

static DEFAULT_PASSWORD: Lazy<Regex> =
    Lazy::new(|| Regex::new("Password:").expect("default password prompt pattern"));

static DEFAULT_BANNER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\w-]+@[\w-]+:[\w/~-]+(\$|#)").expect("default banner pattern"));

/// The three prompt patterns a session watches for.
///
/// The banner is the shell prompt: it ends both the login handshake and each
/// command's output. Defaults match a typical Linux telnet daemon:
///
/// - login prompt: a word followed by literal `login:` (e.g. `host login:`)
/// - password prompt: literal `Password:`
/// - banner: a `user@host:path` shape ending in `$` or `#`
///
/// # Examples
///
/// ```
/// use regex::bytes::Regex;
/// use telnetrust::Prompts;
///
/// let prompts = Prompts {
///     banner: Regex::new(r"router# ").unwrap(),
///     ..Prompts::default()
/// };
/// assert!(prompts.banner.is_match(b"router# "));
/// ```
#[derive(Debug, Clone)]
pub struct Prompts {
    /// Matches a login prompt; a match triggers login submission.
    pub login: Regex,
    /// Matches a password prompt; a match triggers password submission.
    pub password: Regex,
    /// Matches the banner (shell prompt).
    pub banner: Regex,
}

impl Default for Prompts {
    fn default() -> Self {
        Self {
            login: DEFAULT_LOGIN.clone(),
            password: DEFAULT_PASSWORD.clone(),
            banner: DEFAULT_BANNER.clone(),
        }
    }
}

impl Prompts {
    /// Remove every occurrence of the banner pattern from `output` and trim
    /// surrounding ASCII whitespace. Idempotent.
    pub fn strip_banner(&self, output: &[u8]) -> Vec<u8> {
        let stripped = self.banner.replace_all(output, &b""[..]);
        stripped.trim_ascii().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_login_prompt() {
        let prompts = Prompts::default();
        assert!(prompts.login.is_match(b"localhost login:"));
        assert!(prompts.login.is_match(b"my-router login: "));
        assert!(!prompts.login.is_match(b"login"));
    }

    #[test]
    fn default_password_prompt() {
        let prompts = Prompts::default();
        assert!(prompts.password.is_match(b"Password: "));
        assert!(!prompts.password.is_match(b"password: "));
    }

    #[test]
    fn default_banner() {
        let prompts = Prompts::default();
        assert!(prompts.banner.is_match(b"user@host:~$ "));
        assert!(prompts.banner.is_match(b"root@box:/var/log# "));
        assert!(!prompts.banner.is_match(b"user@host "));
    }

    #[test]
    fn strip_banner_removes_prompt_and_trims() {
        let prompts = Prompts::default();
        let output = b"\n\rfile1\nfile2\n\ruser@host:~$ ";
        assert_eq!(prompts.strip_banner(output), b"file1\nfile2");
    }

    #[test]
    fn strip_banner_is_idempotent() {
        let prompts = Prompts::default();
        let once = prompts.strip_banner(b"out \n\ruser@host:~$ ");
        let twice = prompts.strip_banner(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn strip_banner_without_match_only_trims() {
        let prompts = Prompts::default();
        assert_eq!(prompts.strip_banner(b"  plain output  "), b"plain output");
    }
}
