//! Add command: validate magnets locally, forward them, report outcomes.

use owo_colors::OwoColorize;
use serde::Serialize;

use qbitctl_api::{AddOptions, AddOutcome, MagnetLink, Session};
use qbitctl_config::Config;

use crate::cli::{AddArgs, GlobalOpts, OutputFormat};
use crate::config::Daemon;
use crate::error::CliError;
use crate::output;

/// Per-magnet result for structured output.
#[derive(Serialize)]
struct AddReport {
    magnet: String,
    name: String,
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

pub async fn handle(
    daemon: &Daemon,
    cfg: &Config,
    args: AddArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    // Validate everything up front; one bad URI fails the invocation
    // before anything is sent.
    let mut links = Vec::with_capacity(args.magnets.len());
    for raw in &args.magnets {
        let link: MagnetLink = raw.parse().map_err(|e| CliError::InvalidMagnet {
            uri: raw.clone(),
            source: e,
        })?;
        links.push(link);
    }

    if args.skip_repeats {
        let mut seen: Vec<qbitctl_api::InfoHash> = Vec::new();
        links.retain(|link| {
            if seen.contains(link.info_hash()) {
                return false;
            }
            seen.push(link.info_hash().clone());
            true
        });
    }

    let options = AddOptions {
        category: args
            .category
            .clone()
            .or_else(|| cfg.add.category().map(ToOwned::to_owned)),
        save_path: args
            .save_path
            .clone()
            .or_else(|| cfg.add.save_path().map(ToOwned::to_owned)),
        paused: (args.paused || cfg.add.paused).then_some(true),
    };

    // One session for the whole batch; the first add performs the login
    // handshake and the rest ride the same SID cookie.
    let mut session = Session::new();
    let mut reports = Vec::with_capacity(links.len());
    let mut any_rejected = false;

    for link in &links {
        let outcome = daemon
            .client
            .add_magnet(&mut session, link, &options)
            .await
            .map_err(|e| daemon.wrap(e))?;

        let (tag, reason) = match &outcome {
            AddOutcome::Added => ("added", None),
            AddOutcome::Duplicate => ("duplicate", None),
            AddOutcome::Rejected { reason } => {
                any_rejected = true;
                ("rejected", Some(reason.clone()))
            }
        };

        reports.push(AddReport {
            magnet: link.as_str().to_owned(),
            name: link.label(),
            outcome: tag,
            reason,
        });
    }

    print_reports(&reports, global);

    if any_rejected {
        let first = reports
            .iter()
            .find_map(|r| r.reason.clone())
            .unwrap_or_default();
        return Err(CliError::Rejected { message: first });
    }
    Ok(())
}

/// The add command has no tabular view; its table format is the
/// notification-style line list.
fn print_reports(reports: &[AddReport], global: &GlobalOpts) {
    let rendered = match global.output {
        OutputFormat::Table => {
            let color = output::should_color(&global.color);
            reports
                .iter()
                .map(|r| format_line(r, color))
                .collect::<Vec<_>>()
                .join("\n")
        }
        OutputFormat::Json => output::render_json_pretty(reports),
        OutputFormat::JsonCompact => output::render_json_compact(reports),
        OutputFormat::Yaml => output::render_yaml(reports),
        OutputFormat::Plain => reports
            .iter()
            .map(|r| format!("{}\t{}", r.outcome, r.name))
            .collect::<Vec<_>>()
            .join("\n"),
    };
    output::print_output(&rendered, global.quiet);
}

fn format_line(report: &AddReport, color: bool) -> String {
    let marker = match (report.outcome, color) {
        ("added", true) => "+".green().to_string(),
        ("duplicate", true) => "=".yellow().to_string(),
        (_, true) => "!".red().to_string(),
        ("added", false) => "+".into(),
        ("duplicate", false) => "=".into(),
        (_, false) => "!".into(),
    };
    match &report.reason {
        Some(reason) => format!("{marker} {} ({}: {reason})", report.name, report.outcome),
        None => format!("{marker} {} ({})", report.name, report.outcome),
    }
}
