/// Errors of the playlist proxy.
///
/// Each variant carries a public message that is safe to send back to callers
/// and a log context used to tag the detailed error in the logs.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("invalid userId format: {0}")]
    InvalidUserId(String),
    #[error("missing catalog client credentials")]
    MissingCredentials,
    #[error("catalog token request failed with status code: {0}")]
    Auth(u16),
    #[error("user not found: {0}")]
    UserNotFound(String),
    #[error("catalog API request failed with status code: {0}")]
    Upstream(u16),
    #[error("{0}")]
    Internal(String),
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl ProxyError {
    /// HTTP status code returned to the caller
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            Self::InvalidUserId(_) => 400,
            Self::UserNotFound(_) => 404,
            Self::MissingCredentials
            | Self::Auth(_)
            | Self::Upstream(_)
            | Self::Internal(_)
            | Self::Http(_) => 500,
        }
    }

    /// Message returned to the caller. Details stay in the logs.
    #[must_use]
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::InvalidUserId(_) => "Invalid user ID format",
            Self::MissingCredentials => "Service temporarily unavailable",
            Self::Auth(_) => "Authentication failed",
            Self::UserNotFound(_) => "User not found",
            Self::Upstream(_) => "Failed to fetch playlists",
            Self::Internal(_) | Self::Http(_) => "Internal server error",
        }
    }

    #[must_use]
    pub fn log_context(&self) -> &'static str {
        match self {
            Self::InvalidUserId(_) => "VALIDATION",
            Self::MissingCredentials => "CONFIG",
            Self::Auth(_) => "SPOTIFY_AUTH",
            Self::UserNotFound(_) | Self::Upstream(_) => "SPOTIFY_API",
            Self::Internal(_) | Self::Http(_) => "GENERAL",
        }
    }

    /// Logs the error with its context tag
    pub fn log(&self) {
        tracing::error!(context = self.log_context(), "{self:#}");
    }
}
