//! CLI error types with miette diagnostics.
//!
//! Maps `qbitctl-api` and `qbitctl-config` errors into user-facing
//! diagnostics with actionable help text. Each failure class keeps its
//! own variant so the three layers (transport, HTTP, application) stay
//! distinguishable all the way to the terminal.

use miette::Diagnostic;
use thiserror::Error;

use qbitctl_api::MagnetError;
use qbitctl_config::ConfigError;

/// Exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const REJECTED: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the daemon at {url}")]
    #[diagnostic(
        code(qbitctl::connection_failed),
        help(
            "Check that qBittorrent is running and the WebUI is enabled\n\
             (Tools > Options > Web UI), and that the host/port are right.\n\
             Stored settings: qbitctl config show"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: qbitctl_api::Error,
    },

    #[error("Daemon answered HTTP {status}")]
    #[diagnostic(
        code(qbitctl::http_status),
        help("The WebUI is reachable but refused the request. Body: {body}")
    )]
    DaemonHttp { status: u16, body: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(qbitctl::auth_failed),
        help(
            "Verify the WebUI username and password.\n\
             Set the password via the QBIT_PASSWORD environment variable,\n\
             the system keyring, or: qbitctl config init"
        )
    )]
    AuthFailed { message: String },

    // ── Application ──────────────────────────────────────────────────
    #[error("Daemon rejected the request: {message}")]
    #[diagnostic(code(qbitctl::rejected))]
    Rejected { message: String },

    // ── Input ────────────────────────────────────────────────────────
    #[error("Not a usable magnet link: {uri}")]
    #[diagnostic(
        code(qbitctl::invalid_magnet),
        help("Expected magnet:?xt=urn:btih:<40-hex or 32-base32 hash>...")
    )]
    InvalidMagnet {
        uri: String,
        #[source]
        source: MagnetError,
    },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(qbitctl::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("No daemon configured")]
    #[diagnostic(
        code(qbitctl::no_config),
        help(
            "Run: qbitctl config init\n\
             Or pass --host/--port. Expected config at: {path}"
        )
    )]
    NotConfigured { path: String },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(qbitctl::config))]
    Config(#[from] ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("'{action}' requires confirmation")]
    #[diagnostic(
        code(qbitctl::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / data ────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Unexpected daemon payload: {message}")]
    #[diagnostic(code(qbitctl::payload))]
    Payload { message: String },
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::DaemonHttp { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::Rejected { .. } => exit_code::REJECTED,
            Self::InvalidMagnet { .. }
            | Self::Validation { .. }
            | Self::NonInteractiveRequiresYes { .. }
            | Self::NotConfigured { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Wrap an API-layer error, attaching the daemon URL for context.
    ///
    /// Transport errors keep the URL so the help text can point at the
    /// exact address that refused; the other classes map one-to-one.
    pub fn from_api(err: qbitctl_api::Error, url: &url::Url) -> Self {
        match err {
            e @ (qbitctl_api::Error::Transport(_) | qbitctl_api::Error::Tls(_)) => {
                Self::ConnectionFailed {
                    url: url.as_str().trim_end_matches('/').to_owned(),
                    source: e,
                }
            }
            qbitctl_api::Error::HttpStatus { status, body } => Self::DaemonHttp {
                status,
                body: if body.trim().is_empty() {
                    "(empty)".into()
                } else {
                    body.trim().to_owned()
                },
            },
            qbitctl_api::Error::Authentication { message } => Self::AuthFailed { message },
            qbitctl_api::Error::Rejected { reason } => Self::Rejected { message: reason },
            qbitctl_api::Error::Config { message } => Self::Validation {
                field: "connection".into(),
                reason: message,
            },
            qbitctl_api::Error::InvalidUrl(e) => Self::Validation {
                field: "url".into(),
                reason: e.to_string(),
            },
            qbitctl_api::Error::Deserialization { message, .. } => Self::Payload { message },
        }
    }
}
