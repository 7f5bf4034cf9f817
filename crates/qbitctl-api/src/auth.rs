// Login handshake
//
// Cookie-based session login/logout. The login endpoint sets the SID
// cookie in the client's jar; subsequent requests send it automatically.
// The daemon answers 200 with a bare "Ok." or failure text, so success
// is decided by body classification, not status alone.

use secrecy::ExposeSecret;
use tracing::debug;

use crate::classify::{self, LoginOutcome};
use crate::client::QbtClient;
use crate::error::Error;
use crate::session::Session;

impl QbtClient {
    /// Authenticate with the daemon using the client's credentials.
    ///
    /// `POST /api/v2/auth/login` with a form-encoded username/password.
    /// Returns `Ok(true)` iff the daemon answered 2xx with "Ok." -- the
    /// session becomes `Authenticated` and the SID cookie is in the jar.
    /// `Ok(false)` means the daemon denied the credentials; the session
    /// stays `Unauthenticated` so the next call re-attempts the login.
    /// Transport and HTTP-level failures are `Err` and also reset the
    /// session.
    pub async fn login(&self, session: &mut Session) -> Result<bool, Error> {
        let Some(creds) = self.credentials() else {
            return Err(Error::Config {
                message: "no credentials configured for login".into(),
            });
        };

        let url = self.api_url("auth/login");
        debug!("logging in at {}", url);

        let result = self
            .post_form(
                url,
                &[
                    ("username", creds.username.as_str()),
                    ("password", creds.password.expose_secret()),
                ],
            )
            .await;

        let body = match result {
            Ok(body) => body,
            Err(e) => {
                session.invalidate();
                return Err(e);
            }
        };

        match classify::classify_login(&body) {
            LoginOutcome::Accepted => {
                debug!("login successful");
                session.establish();
                Ok(true)
            }
            LoginOutcome::Denied { reason } => {
                debug!(reason, "login denied");
                session.invalidate();
                Ok(false)
            }
        }
    }

    /// End the current session.
    ///
    /// `POST /api/v2/auth/logout`. The session value is reset regardless
    /// of the outcome; the daemon forgets the SID on its side.
    pub async fn logout(&self, session: &mut Session) -> Result<(), Error> {
        let url = self.api_url("auth/logout");
        debug!("logging out at {}", url);
        session.invalidate();
        let _body = self.post_form(url, &[]).await?;
        Ok(())
    }

    /// Ensure the threaded session is authenticated, attempting at most
    /// one login.
    ///
    /// A client without credentials proceeds unauthenticated -- daemons
    /// with local-auth bypass accept that, and everything else answers
    /// 403 which surfaces through the calling operation.
    pub(crate) async fn ensure_authenticated(&self, session: &mut Session) -> Result<(), Error> {
        if session.is_authenticated() || self.credentials().is_none() {
            return Ok(());
        }
        if self.login(session).await? {
            Ok(())
        } else {
            Err(Error::Authentication {
                message: "daemon denied the configured credentials".into(),
            })
        }
    }
}
