// qBittorrent Web API HTTP client
//
// Wraps `reqwest::Client` with `/api/v2/` URL construction, status-code
// mapping, and body handling. Endpoint groups (auth, app, torrents) are
// implemented as inherent methods in sibling files to keep this module
// focused on transport mechanics.

use reqwest::StatusCode;
use secrecy::SecretString;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Username/password pair for the login handshake.
///
/// Absent credentials mean "no authentication attempted" -- a daemon with
/// local-auth bypass enabled serves such clients anyway.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

/// Raw HTTP client for the qBittorrent Web API.
///
/// Holds connection parameters only; authentication state is carried by
/// the [`Session`](crate::Session) value the caller threads through
/// session-scoped operations. The SID cookie set by a successful login
/// lives in the underlying client's cookie jar.
pub struct QbtClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Option<Credentials>,
}

impl QbtClient {
    /// Create a client from a daemon base URL (e.g. `http://localhost:8080`)
    /// and transport settings.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        if base_url.host_str().is_none_or(str::is_empty) {
            return Err(Error::Config {
                message: "daemon hostname is required".into(),
            });
        }
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            credentials: None,
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    ///
    /// Use this in tests, or when the client needs a cookie jar shared
    /// with something else.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            credentials: None,
        }
    }

    /// Attach login credentials. Session-scoped calls authenticate with
    /// these when the threaded session is not yet established.
    pub fn with_credentials(mut self, username: impl Into<String>, password: SecretString) -> Self {
        self.credentials = Some(Credentials {
            username: username.into(),
            password,
        });
        self
    }

    /// The daemon base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build `{base}/api/v2/{endpoint}`.
    pub(crate) fn api_url(&self, endpoint: &str) -> Url {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}/api/v2/{endpoint}");
        Url::parse(&full).expect("invalid API URL")
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request, expect 2xx, return the body as text.
    pub(crate) async fn get_text(&self, url: Url) -> Result<String, Error> {
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        Self::read_ok_body(resp).await
    }

    /// Send a GET request, expect 2xx, deserialize the body as JSON.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        let body = Self::read_ok_body(resp).await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview = &body[..body.len().min(200)];
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }

    /// Send a form-encoded POST, expect 2xx, return the body as text.
    pub(crate) async fn post_form(
        &self,
        url: Url,
        form: &[(&str, &str)],
    ) -> Result<String, Error> {
        debug!("POST {}", url);
        let resp = self
            .http
            .post(url)
            .form(form)
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::read_ok_body(resp).await
    }

    /// Send a multipart POST, expect 2xx, return the body as text.
    ///
    /// torrents/add takes multipart form data; the other mutating
    /// endpoints are urlencoded.
    pub(crate) async fn post_multipart(
        &self,
        url: Url,
        form: reqwest::multipart::Form,
    ) -> Result<String, Error> {
        debug!("POST {} (multipart)", url);
        let resp = self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::read_ok_body(resp).await
    }

    /// Map the response status and consume the body.
    async fn read_ok_body(resp: reqwest::Response) -> Result<String, Error> {
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        resp.text().await.map_err(Error::Transport)
    }

    /// Reinterpret a 403 as an authentication failure.
    ///
    /// On session-scoped endpoints 403 means "no valid session" (or IP
    /// ban), not a generic HTTP failure; callers apply this after any
    /// session-scoped request so the CLI can word the message correctly.
    /// Unauthenticated probes keep the plain `HttpStatus` variant.
    pub(crate) fn escalate_forbidden(err: Error) -> Error {
        match err {
            Error::HttpStatus { status, body } if status == StatusCode::FORBIDDEN.as_u16() => {
                Error::Authentication {
                    message: if body.trim().is_empty() {
                        "daemon refused the request (no valid session)".into()
                    } else {
                        body.trim().to_owned()
                    },
                }
            }
            other => other,
        }
    }
}
