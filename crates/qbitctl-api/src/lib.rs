// qbitctl-api: Async Rust client for the qBittorrent Web API (v2)

pub mod app;
pub mod auth;
pub mod classify;
pub mod client;
pub mod error;
pub mod magnet;
pub mod models;
pub mod session;
pub mod torrents;
pub mod transport;

pub use classify::LoginOutcome;
pub use client::{Credentials, QbtClient};
pub use error::Error;
pub use magnet::{InfoHash, MagnetError, MagnetLink};
pub use models::{AddOptions, AddOutcome, Category, DaemonInfo, TorrentInfo, TorrentState};
pub use session::{Session, SessionState};
pub use transport::{TlsMode, TransportConfig};
