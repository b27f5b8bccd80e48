use chrono::{DateTime, Utc};

use crate::{error::RecError, types::Token};

/// Bearer credential handed to the recommendation engine by its host.
///
/// The engine never looks at session or global state; it asks this value for a
/// usable bearer token before every remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialContext {
    access_token: Option<String>,
    expires_at: Option<DateTime<Utc>>,
}

impl CredentialContext {
    pub fn new(access_token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            expires_at: Some(expires_at),
        }
    }

    /// A context without any token; every call fails with `NotAuthenticated`.
    pub fn anonymous() -> Self {
        Self {
            access_token: None,
            expires_at: None,
        }
    }

    pub fn from_token(token: Option<&Token>) -> Self {
        match token {
            Some(t) => Self {
                access_token: Some(t.access_token.clone()),
                expires_at: t.expires_at(),
            },
            None => Self::anonymous(),
        }
    }

    /// Returns the token to send with the next call.
    ///
    /// # Errors
    ///
    /// - [`RecError::NotAuthenticated`] when there is no token or it is empty
    /// - [`RecError::CredentialExpired`] when the expiry has passed or is unknown
    pub fn bearer(&self) -> Result<&str, RecError> {
        self.bearer_at(Utc::now())
    }

    /// Returns the token if present and not past its expiry at `now`.
    pub fn bearer_at(&self, now: DateTime<Utc>) -> Result<&str, RecError> {
        let token = self
            .access_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(RecError::NotAuthenticated)?;

        match self.expires_at {
            Some(expires_at) if now <= expires_at => Ok(token),
            _ => Err(RecError::CredentialExpired),
        }
    }
}
