// Application endpoints: version probing.

use tracing::debug;

use crate::client::QbtClient;
use crate::error::Error;
use crate::models::DaemonInfo;

impl QbtClient {
    /// Get the daemon's application version.
    ///
    /// `GET /api/v2/app/version` -> plain-text string, e.g. `"v4.5.2"`.
    /// Served without authentication.
    pub async fn version(&self) -> Result<String, Error> {
        let url = self.api_url("app/version");
        debug!("fetching app version");
        let body = self.get_text(url).await?;
        Ok(body.trim().to_owned())
    }

    /// Get the daemon's Web API version.
    ///
    /// `GET /api/v2/app/webapiversion` -> plain-text string, e.g. `"2.8.19"`.
    pub async fn webapi_version(&self) -> Result<String, Error> {
        let url = self.api_url("app/webapiversion");
        debug!("fetching web API version");
        let body = self.get_text(url).await?;
        Ok(body.trim().to_owned())
    }

    /// Test the connection with an unauthenticated version probe.
    ///
    /// Failure keeps the three classes distinguishable for the caller:
    /// `Transport` (daemon unreachable), `HttpStatus` (daemon answered
    /// but refused, status preserved), `Rejected`/`Deserialization`
    /// (daemon-level oddities). The API version is fetched best-effort;
    /// daemons too old to serve `webapiversion` still probe successfully.
    pub async fn probe(&self) -> Result<DaemonInfo, Error> {
        let version = self.version().await?;
        let api_version = self.webapi_version().await.ok();
        Ok(DaemonInfo {
            version,
            api_version,
        })
    }
}
