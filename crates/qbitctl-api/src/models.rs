// Response types for the qBittorrent Web API.
//
// torrents/info returns large objects whose field set drifts across
// daemon versions. The commonly needed fields are modeled explicitly
// with `#[serde(default)]`; everything else lands in `extra`.

use serde::{Deserialize, Serialize};

// ── Probe ────────────────────────────────────────────────────────────

/// Result of a successful connection probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaemonInfo {
    /// Application version, e.g. `"v4.5.2"`.
    pub version: String,
    /// Web API version, e.g. `"2.8.19"`. `None` on daemons too old to
    /// serve `app/webapiversion`.
    pub api_version: Option<String>,
}

// ── Add ──────────────────────────────────────────────────────────────

/// Classified outcome of a torrents/add call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// Daemon accepted the magnet ("Ok.").
    Added,
    /// Torrent already queued ("Fails.").
    Duplicate,
    /// 2xx with any other body; raw text preserved for diagnostics.
    Rejected { reason: String },
}

/// Optional parameters for torrents/add.
///
/// Unset fields are omitted from the form entirely -- the daemon applies
/// its own defaults.
#[derive(Debug, Clone, Default)]
pub struct AddOptions {
    /// Category to assign the new torrent to.
    pub category: Option<String>,
    /// Download location override.
    pub save_path: Option<String>,
    /// Add in the paused state.
    pub paused: Option<bool>,
}

// ── Torrent list ─────────────────────────────────────────────────────

/// Torrent state strings from torrents/info.
///
/// Pre-4.x daemons and future versions can emit strings not in this set;
/// those deserialize as [`Unknown`](Self::Unknown) rather than failing
/// the whole list call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TorrentState {
    #[serde(rename = "error")]
    Error,
    #[serde(rename = "missingFiles")]
    MissingFiles,
    #[serde(rename = "uploading")]
    Uploading,
    #[serde(rename = "pausedUP")]
    PausedUp,
    #[serde(rename = "queuedUP")]
    QueuedUp,
    #[serde(rename = "stalledUP")]
    StalledUp,
    #[serde(rename = "checkingUP")]
    CheckingUp,
    #[serde(rename = "forcedUP")]
    ForcedUp,
    #[serde(rename = "allocating")]
    Allocating,
    #[serde(rename = "downloading")]
    Downloading,
    #[serde(rename = "metaDL")]
    MetaDownload,
    #[serde(rename = "pausedDL")]
    PausedDl,
    #[serde(rename = "queuedDL")]
    QueuedDl,
    #[serde(rename = "stalledDL")]
    StalledDl,
    #[serde(rename = "checkingDL")]
    CheckingDl,
    #[serde(rename = "forcedDL")]
    ForcedDl,
    #[serde(rename = "checkingResumeData")]
    CheckingResumeData,
    #[serde(rename = "moving")]
    Moving,
    #[serde(other)]
    Unknown,
}

impl TorrentState {
    /// Actively fetching payload or metadata.
    pub fn is_downloading(&self) -> bool {
        matches!(
            self,
            Self::Downloading | Self::MetaDownload | Self::StalledDl | Self::ForcedDl
        )
    }

    /// Complete and available to peers.
    pub fn is_seeding(&self) -> bool {
        matches!(self, Self::Uploading | Self::StalledUp | Self::ForcedUp)
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, Self::PausedDl | Self::PausedUp)
    }

    /// Download finished (seeding, paused-complete, or queued for upload).
    pub fn is_complete(&self) -> bool {
        self.is_seeding() || matches!(self, Self::PausedUp | Self::QueuedUp | Self::CheckingUp)
    }

    pub fn is_errored(&self) -> bool {
        matches!(self, Self::Error | Self::MissingFiles)
    }
}

/// One entry from torrents/info.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TorrentInfo {
    pub hash: String,
    pub name: String,
    pub state: TorrentState,
    /// Completion fraction in `0.0..=1.0`.
    #[serde(default)]
    pub progress: f64,
    /// Total selected size in bytes.
    #[serde(default)]
    pub size: i64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub save_path: String,
    /// Download rate, bytes/s.
    #[serde(default, rename = "dlspeed")]
    pub dl_speed: i64,
    /// Upload rate, bytes/s.
    #[serde(default, rename = "upspeed")]
    pub up_speed: i64,
    /// Unix timestamp of when the torrent was added.
    #[serde(default)]
    pub added_on: i64,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Categories ───────────────────────────────────────────────────────

/// One category from torrents/categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default, rename = "savePath")]
    pub save_path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn torrent_state_unknown_fallback() {
        let state: TorrentState = serde_json::from_str("\"somethingNew\"").expect("deserialize");
        assert_eq!(state, TorrentState::Unknown);
    }

    #[test]
    fn torrent_state_classes() {
        assert!(TorrentState::Downloading.is_downloading());
        assert!(TorrentState::MetaDownload.is_downloading());
        assert!(TorrentState::Uploading.is_seeding());
        assert!(TorrentState::PausedDl.is_paused());
        assert!(TorrentState::PausedUp.is_paused());
        assert!(TorrentState::PausedUp.is_complete());
        assert!(!TorrentState::PausedDl.is_complete());
        assert!(TorrentState::MissingFiles.is_errored());
    }

    #[test]
    fn torrent_info_tolerates_sparse_objects() {
        let t: TorrentInfo = serde_json::from_value(serde_json::json!({
            "hash": "c9e15763f722f23e98a29decdfae341b98d53056",
            "name": "ubuntu-24.04-desktop-amd64.iso",
            "state": "downloading"
        }))
        .expect("deserialize");
        assert_eq!(t.name, "ubuntu-24.04-desktop-amd64.iso");
        assert_eq!(t.progress, 0.0);
        assert_eq!(t.size, 0);
    }
}
