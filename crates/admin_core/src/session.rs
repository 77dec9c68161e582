//! Explicit session context, constructed at sign-in and dropped at sign-out.
//!
//! Nothing process-wide holds credentials: pages and gateways receive the
//! context they should act under, and signing out is simply tearing it down.

use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid base url {url}: {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("unsupported base url scheme {scheme}; expected http or https")]
    UnsupportedScheme { scheme: String },
}

#[derive(Debug, Clone)]
pub struct SessionUser {
    pub user_id: i64,
    pub display_name: String,
}

#[derive(Debug, Clone)]
pub struct SessionContext {
    base_url: String,
    token: String,
    user: SessionUser,
}

impl SessionContext {
    /// Validates the backend base URL and binds the signed-in user to it.
    pub fn establish(
        base_url: &str,
        token: impl Into<String>,
        user: SessionUser,
    ) -> Result<Self, SessionError> {
        let parsed = Url::parse(base_url).map_err(|source| SessionError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(SessionError::UnsupportedScheme {
                scheme: parsed.scheme().to_string(),
            });
        }
        tracing::debug!(user_id = user.user_id, "session established");
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            user,
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn bearer_token(&self) -> &str {
        &self.token
    }

    pub fn user(&self) -> &SessionUser {
        &self.user
    }

    /// Sign-out teardown; consumes the context so no page can keep acting
    /// under it.
    pub fn close(self) {
        tracing::info!(user_id = self.user.user_id, "session closed");
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
