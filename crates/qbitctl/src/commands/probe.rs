//! Connection probe handler.

use owo_colors::OwoColorize;

use crate::cli::GlobalOpts;
use crate::config::Daemon;
use crate::error::CliError;
use crate::output;

pub async fn handle(daemon: &Daemon, global: &GlobalOpts) -> Result<(), CliError> {
    let info = daemon.client.probe().await.map_err(|e| daemon.wrap(e))?;

    let color = output::should_color(&global.color);
    let rendered = output::render_single(
        &global.output,
        &info,
        |i| {
            let status = if color {
                "connected".green().to_string()
            } else {
                "connected".to_string()
            };
            let mut lines = vec![
                format!("Daemon:  {} ({status})", daemon.url.as_str().trim_end_matches('/')),
                format!("Version: {}", i.version),
            ];
            if let Some(ref api) = i.api_version {
                lines.push(format!("Web API: {api}"));
            }
            lines.join("\n")
        },
        |i| i.version.clone(),
    );

    output::print_output(&rendered, global.quiet);
    Ok(())
}
