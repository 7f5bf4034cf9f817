//! CLI-side configuration resolution.
//!
//! Merges the stored record with CLI flag / env overrides, then builds
//! the API client. Flags always win over the file; the file wins over
//! built-in defaults.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use qbitctl_api::{QbtClient, TlsMode, TransportConfig};
use qbitctl_config::{Config, ConnectionSettings};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// A connected-ready daemon handle: the client plus the URL it was
/// built from (kept for error context).
pub struct Daemon {
    pub client: QbtClient,
    pub url: Url,
}

impl Daemon {
    /// Wrap an API error with this daemon's URL for diagnostics.
    pub fn wrap(&self, err: qbitctl_api::Error) -> CliError {
        CliError::from_api(err, &self.url)
    }
}

/// The stored record with CLI flag overrides applied.
pub fn effective_config(global: &GlobalOpts) -> Config {
    let mut cfg = qbitctl_config::load_config_or_default();
    let conn = &mut cfg.connection;

    if let Some(ref host) = global.host {
        conn.hostname = host.clone();
    }
    if let Some(port) = global.port {
        conn.port = port;
    }
    if global.https {
        conn.use_https = true;
    }
    if let Some(ref username) = global.username {
        conn.username = username.clone();
    }
    if let Some(timeout) = global.timeout {
        conn.timeout_secs = timeout;
    }
    if global.insecure {
        conn.accept_invalid_certs = true;
    }

    cfg
}

/// Build a daemon handle from the effective settings.
///
/// Fails fast (no network call) when the settings cannot produce a
/// usable URL: unconfigured hostname gets the "run config init" hint,
/// anything else surfaces the validation reason.
pub fn connect(global: &GlobalOpts) -> Result<(Daemon, Config), CliError> {
    let cfg = effective_config(global);
    let conn = &cfg.connection;

    if conn.hostname.trim().is_empty() {
        return Err(CliError::NotConfigured {
            path: qbitctl_config::config_path().display().to_string(),
        });
    }

    let url = conn.base_url()?;
    let transport = transport_for(conn);
    let mut client =
        QbtClient::new(url.clone(), &transport).map_err(|e| CliError::from_api(e, &url))?;

    if !conn.username.is_empty() {
        // Empty password is a valid WebUI configuration; send it as-is.
        let password = qbitctl_config::resolve_password(conn)
            .unwrap_or_else(|| SecretString::from(String::new()));
        client = client.with_credentials(conn.username.clone(), password);
    }

    Ok((Daemon { client, url }, cfg))
}

fn transport_for(conn: &ConnectionSettings) -> TransportConfig {
    TransportConfig {
        tls: if conn.accept_invalid_certs {
            TlsMode::DangerAcceptInvalid
        } else {
            TlsMode::System
        },
        timeout: Duration::from_secs(conn.timeout_secs),
    }
}
