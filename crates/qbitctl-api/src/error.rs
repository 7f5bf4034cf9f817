use thiserror::Error;

/// Top-level error type for the `qbitctl-api` crate.
///
/// Every operation distinguishes three failure classes: transport failure
/// (daemon unreachable), HTTP-level failure (non-2xx), and application-level
/// rejection (2xx but daemon-specific failure text). The CLI maps each
/// variant to exactly one user-facing message.
#[derive(Debug, Error)]
pub enum Error {
    // ── Configuration ───────────────────────────────────────────────
    /// Missing or invalid connection parameters. Raised before any
    /// network call is attempted.
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── HTTP status ─────────────────────────────────────────────────
    /// The daemon answered with a non-2xx status.
    #[error("Daemon returned HTTP {status}")]
    HttpStatus { status: u16, body: String },

    // ── Application ─────────────────────────────────────────────────
    /// Login denied, or the daemon refused a request for lack of a
    /// valid session (HTTP 403 on session-scoped endpoints).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// 2xx response carrying daemon-specific failure text.
    #[error("Daemon rejected request: {reason}")]
    Rejected { reason: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error indicates the session is no longer
    /// valid and a fresh login might resolve it.
    pub fn is_auth_expired(&self) -> bool {
        match self {
            Self::Authentication { .. } => true,
            Self::HttpStatus { status, .. } => *status == 403,
            _ => false,
        }
    }

    /// Returns `true` if this is a transient error where the daemon may
    /// simply not be running yet. Nothing in this crate retries; callers
    /// use this to word their diagnostics.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// The HTTP status code, when this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
