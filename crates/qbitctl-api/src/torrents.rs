// Torrent endpoints: add, list, categories, pause.
//
// All of these are session-scoped: the daemon answers 403 without a valid
// SID cookie. Each method ensures the threaded session is authenticated
// (at most one login attempt) and resets it on any failure, so the next
// call starts with a fresh handshake. Nothing is retried automatically.

use std::collections::HashMap;

use tracing::debug;

use crate::classify;
use crate::client::QbtClient;
use crate::error::Error;
use crate::magnet::MagnetLink;
use crate::models::{AddOptions, AddOutcome, Category, TorrentInfo};
use crate::session::Session;

impl QbtClient {
    /// Forward a magnet link to the daemon.
    ///
    /// `POST /api/v2/torrents/add` with a multipart form: `urls` plus
    /// the optional `savepath` / `category` / `paused` fields. The 2xx
    /// body decides the outcome: "Ok." added, "Fails." already queued,
    /// anything else a rejection with the raw text preserved.
    pub async fn add_magnet(
        &self,
        session: &mut Session,
        magnet: &MagnetLink,
        options: &AddOptions,
    ) -> Result<AddOutcome, Error> {
        self.ensure_authenticated(session).await?;

        let url = self.api_url("torrents/add");
        debug!(hash = %magnet.info_hash(), "adding magnet");

        let mut form = reqwest::multipart::Form::new().text("urls", magnet.as_str().to_owned());
        if let Some(ref save_path) = options.save_path {
            form = form.text("savepath", save_path.clone());
        }
        if let Some(ref category) = options.category {
            form = form.text("category", category.clone());
        }
        if let Some(paused) = options.paused {
            form = form.text("paused", if paused { "true" } else { "false" });
        }

        let body = self
            .post_multipart(url, form)
            .await
            .map_err(|e| Self::note_session_failure(session, e))?;

        Ok(classify::classify_add(&body))
    }

    /// List the transfer queue.
    ///
    /// `GET /api/v2/torrents/info` -> JSON array. Failure is an explicit
    /// `Err`; an empty `Ok` vector always means the daemon reported zero
    /// torrents.
    pub async fn list(&self, session: &mut Session) -> Result<Vec<TorrentInfo>, Error> {
        self.ensure_authenticated(session).await?;

        let url = self.api_url("torrents/info");
        debug!("listing torrents");
        self.get_json(url)
            .await
            .map_err(|e| Self::note_session_failure(session, e))
    }

    /// List configured categories.
    ///
    /// `GET /api/v2/torrents/categories` -> JSON object keyed by
    /// category name.
    pub async fn categories(
        &self,
        session: &mut Session,
    ) -> Result<HashMap<String, Category>, Error> {
        self.ensure_authenticated(session).await?;

        let url = self.api_url("torrents/categories");
        debug!("listing categories");
        self.get_json(url)
            .await
            .map_err(|e| Self::note_session_failure(session, e))
    }

    /// Pause every torrent.
    ///
    /// `POST /api/v2/torrents/pause` with the `all` sentinel. Success
    /// means the daemon accepted the call, not that any torrent actually
    /// changed state.
    pub async fn pause_all(&self, session: &mut Session) -> Result<(), Error> {
        self.ensure_authenticated(session).await?;

        let url = self.api_url("torrents/pause");
        debug!("pausing all torrents");
        let _body = self
            .post_form(url, &[("hashes", "all")])
            .await
            .map_err(|e| Self::note_session_failure(session, e))?;
        Ok(())
    }

    /// Reset the session after a failed session-scoped request and
    /// upgrade a bare 403 into an authentication error.
    fn note_session_failure(session: &mut Session, err: Error) -> Error {
        session.invalidate();
        Self::escalate_forbidden(err)
    }
}
