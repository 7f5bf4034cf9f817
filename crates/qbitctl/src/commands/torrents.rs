//! Queue command handlers: list, status, categories, pause-all.

use bytesize::ByteSize;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tabled::Tabled;

use qbitctl_api::{Session, TorrentInfo, TorrentState};

use crate::cli::{GlobalOpts, ListArgs, StateClass};
use crate::config::Daemon;
use crate::error::CliError;
use crate::output;

use super::confirm;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct TorrentRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "DL")]
    dl: String,
    #[tabled(rename = "UP")]
    up: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Added")]
    added: String,
}

impl From<&TorrentInfo> for TorrentRow {
    fn from(t: &TorrentInfo) -> Self {
        Self {
            name: t.name.clone(),
            state: format!("{:?}", t.state),
            progress: format!("{:.1}%", t.progress * 100.0),
            size: ByteSize::b(t.size.max(0).unsigned_abs()).to_string(),
            dl: rate(t.dl_speed),
            up: rate(t.up_speed),
            category: t.category.clone(),
            added: added_date(t.added_on),
        }
    }
}

fn rate(bytes_per_sec: i64) -> String {
    if bytes_per_sec <= 0 {
        "-".into()
    } else {
        format!("{}/s", ByteSize::b(bytes_per_sec.unsigned_abs()))
    }
}

fn added_date(unix_ts: i64) -> String {
    DateTime::<Utc>::from_timestamp(unix_ts, 0)
        .map_or_else(|| "-".into(), |dt| dt.format("%Y-%m-%d").to_string())
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Save path")]
    save_path: String,
}

// ── State classification ────────────────────────────────────────────

fn in_class(state: TorrentState, class: StateClass) -> bool {
    match class {
        StateClass::Downloading => state.is_downloading(),
        StateClass::Seeding => state.is_seeding(),
        StateClass::Paused => state.is_paused(),
        StateClass::Completed => state.is_complete(),
        StateClass::Errored => state.is_errored(),
    }
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn list(daemon: &Daemon, args: ListArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut session = Session::new();
    let mut torrents = daemon
        .client
        .list(&mut session)
        .await
        .map_err(|e| daemon.wrap(e))?;

    if let Some(class) = args.state {
        torrents.retain(|t| in_class(t.state, class));
    }
    if let Some(ref category) = args.category {
        torrents.retain(|t| t.category == *category);
    }

    let rendered = output::render_list(
        &global.output,
        &torrents,
        |t| TorrentRow::from(t),
        |t| t.hash.clone(),
    );
    output::print_output(&rendered, global.quiet);
    Ok(())
}

/// Aggregate queue totals, the popup-dashboard view of the queue.
#[derive(Debug, Serialize)]
struct StatusSummary {
    total: usize,
    downloading: usize,
    seeding: usize,
    paused: usize,
    completed: usize,
    errored: usize,
    daemon_version: String,
}

pub async fn status(daemon: &Daemon, global: &GlobalOpts) -> Result<(), CliError> {
    let mut session = Session::new();
    let torrents = daemon
        .client
        .list(&mut session)
        .await
        .map_err(|e| daemon.wrap(e))?;
    let info = daemon.client.probe().await.map_err(|e| daemon.wrap(e))?;

    let count = |class: StateClass| torrents.iter().filter(|t| in_class(t.state, class)).count();
    let summary = StatusSummary {
        total: torrents.len(),
        downloading: count(StateClass::Downloading),
        seeding: count(StateClass::Seeding),
        paused: count(StateClass::Paused),
        completed: count(StateClass::Completed),
        errored: count(StateClass::Errored),
        daemon_version: info.version,
    };

    let rendered = output::render_single(
        &global.output,
        &summary,
        |s| {
            [
                format!("Daemon:      qBittorrent {}", s.daemon_version),
                format!("Torrents:    {}", s.total),
                format!("Downloading: {}", s.downloading),
                format!("Seeding:     {}", s.seeding),
                format!("Paused:      {}", s.paused),
                format!("Completed:   {}", s.completed),
                format!("Errored:     {}", s.errored),
            ]
            .join("\n")
        },
        |s| s.total.to_string(),
    );
    output::print_output(&rendered, global.quiet);
    Ok(())
}

pub async fn categories(daemon: &Daemon, global: &GlobalOpts) -> Result<(), CliError> {
    let mut session = Session::new();
    let categories = daemon
        .client
        .categories(&mut session)
        .await
        .map_err(|e| daemon.wrap(e))?;

    let mut entries: Vec<_> = categories.into_values().collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    let rendered = output::render_list(
        &global.output,
        &entries,
        |c| CategoryRow {
            name: c.name.clone(),
            save_path: if c.save_path.is_empty() {
                "-".into()
            } else {
                c.save_path.clone()
            },
        },
        |c| c.name.clone(),
    );
    output::print_output(&rendered, global.quiet);
    Ok(())
}

pub async fn pause_all(daemon: &Daemon, global: &GlobalOpts) -> Result<(), CliError> {
    if !confirm("Pause every torrent in the queue?", global.yes)? {
        return Ok(());
    }

    let mut session = Session::new();
    daemon
        .client
        .pause_all(&mut session)
        .await
        .map_err(|e| daemon.wrap(e))?;

    output::print_output("Pause request accepted", global.quiet);
    Ok(())
}
