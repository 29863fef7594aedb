//! Session token type.
//!
//! The remote store issues an opaque token after login. The client never
//! inspects it: it is stored durably, forwarded in the `token` header of every
//! cart and order request, and replaced wholesale on login or logout.

use core::fmt;

use secrecy::{ExposeSecret, SecretString};

/// Opaque credential identifying a signed-in customer to the remote store.
///
/// Implements `Debug` manually so the token never ends up in logs.
#[derive(Clone)]
pub struct SessionToken(SecretString);

impl SessionToken {
    /// Wrap a raw token string.
    ///
    /// Surrounding whitespace (e.g. a trailing newline from a token file) is
    /// trimmed. Returns `None` if nothing remains.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(SecretString::from(trimmed.to_owned())))
    }

    /// Expose the raw token for use in a request header.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken").field(&"[REDACTED]").finish()
    }
}

impl PartialEq for SessionToken {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for SessionToken {}
