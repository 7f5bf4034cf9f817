//! Command dispatch: bridges CLI args -> API calls -> output formatting.

pub mod add;
pub mod config_cmd;
pub mod probe;
pub mod torrents;

use qbitctl_config::Config;

use crate::cli::{Command, GlobalOpts};
use crate::config::Daemon;
use crate::error::CliError;

/// Dispatch a daemon-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    daemon: &Daemon,
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Probe => probe::handle(daemon, global).await,
        Command::Add(args) => add::handle(daemon, cfg, args, global).await,
        Command::List(args) => torrents::list(daemon, args, global).await,
        Command::Status => torrents::status(daemon, global).await,
        Command::Categories => torrents::categories(daemon, global).await,
        Command::PauseAll => torrents::pause_all(daemon, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal there is nobody to ask; the caller gets an error
/// pointing at `--yes` instead of a hung prompt.
pub fn confirm(action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(action)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}
