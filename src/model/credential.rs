use std::fmt;

/// Shortest token length accepted as plausible.
const MIN_TOKEN_LENGTH: usize = 50;
/// Longest token length accepted as plausible.
const MAX_TOKEN_LENGTH: usize = 100;

/// Secret bot token used to authenticate a session.
///
/// The raw value is only reachable through [`Credential::expose`]. `Debug` and
/// `Display` both redact it so a credential can be passed through logging macros
/// without leaking.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wraps operator input or stored text as a credential.
    ///
    /// Surrounding whitespace is stripped. Blank input yields `None`, which is the
    /// "no credential configured" state rather than an error.
    ///
    /// # Arguments
    /// - `raw` - Token text as typed or read from storage
    ///
    /// # Returns
    /// - `Some(Credential)` - Non-blank token
    /// - `None` - Input was empty or whitespace only
    pub fn parse(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    /// Checks the token looks like a Discord bot token before any connection attempt.
    ///
    /// Bot tokens are three non-empty, dot-separated segments without whitespace and
    /// roughly 59-72 characters long. Anything far outside that shape is rejected
    /// locally instead of costing a gateway handshake.
    pub fn is_plausible(&self) -> bool {
        let len = self.0.len();
        if !(MIN_TOKEN_LENGTH..=MAX_TOKEN_LENGTH).contains(&len) {
            return false;
        }
        if self.0.chars().any(char::is_whitespace) {
            return false;
        }

        let segments: Vec<&str> = self.0.split('.').collect();
        segments.len() == 3 && segments.iter().all(|s| !s.is_empty())
    }

    /// Returns the raw token. Only the gateway adapter and token storage call this.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns a masked form suitable for display, keeping the last four characters.
    pub fn masked(&self) -> String {
        let visible: String = self
            .0
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("{}{}", "*".repeat(12), visible)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([redacted])")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[redacted]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "MTIzNDU2Nzg5MDEyMzQ1Njc4.GaBcDe.abcdefghijklmnopqrstuvwxyz0123456789AB";

    #[test]
    fn blank_input_is_absent() {
        assert!(Credential::parse("").is_none());
        assert!(Credential::parse("   \n").is_none());
    }

    #[test]
    fn accepts_token_shaped_input() {
        let credential = Credential::parse(format!("  {TOKEN}\n")).unwrap();
        assert!(credential.is_plausible());
        assert_eq!(credential.expose(), TOKEN);
    }

    #[test]
    fn rejects_implausible_tokens() {
        for raw in ["abc", "a.b.c", "no-dots-at-all-but-long-enough-to-pass-the-length-check-xx"] {
            let credential = Credential::parse(raw).unwrap();
            assert!(!credential.is_plausible(), "{raw} should be rejected");
        }
    }

    /// Tests that formatting never reveals the secret.
    ///
    /// Expected: neither Debug nor Display contain the token text
    #[test]
    fn formatting_redacts_token() {
        let credential = Credential::parse(TOKEN).unwrap();
        assert!(!format!("{credential:?}").contains("GaBcDe"));
        assert!(!format!("{credential}").contains("GaBcDe"));
        assert!(credential.masked().ends_with("89AB"));
        assert!(!credential.masked().contains("GaBcDe"));
    }
}
