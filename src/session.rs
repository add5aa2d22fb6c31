//! Session state machine.

use std::fmt;

/// Authentication state owned by a client.
///
/// Starts `Unauthenticated`, becomes `Authenticated` after a successful
/// login, and falls back to `Unauthenticated` on logout or when the server
/// rejects the token.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Unauthenticated,
    Authenticated { token: String },
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// The session token, when authenticated.
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Authenticated { token } => Some(token),
            Self::Unauthenticated => None,
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthenticated => f.write_str("Unauthenticated"),
            Self::Authenticated { .. } => f.write_str("Authenticated"),
        }
    }
}
