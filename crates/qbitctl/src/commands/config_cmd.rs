//! Config subcommand handlers.

use dialoguer::{Confirm, Input, Select};

use qbitctl_config::{Config, ConnectionSettings};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(),
        ConfigCommand::Show => show(global),
        ConfigCommand::Path => {
            output::print_output(
                &qbitctl_config::config_path().display().to_string(),
                global.quiet,
            );
            Ok(())
        }
    }
}

// ── Init: interactive wizard ────────────────────────────────────────

fn init() -> Result<(), CliError> {
    let config_path = qbitctl_config::config_path();
    eprintln!("qbitctl — configuration wizard");
    eprintln!("   Config path: {}\n", config_path.display());

    let current = qbitctl_config::load_config_or_default();

    // 1. Daemon address
    let hostname: String = Input::new()
        .with_prompt("Daemon hostname")
        .default(if current.connection.hostname.is_empty() {
            "localhost".into()
        } else {
            current.connection.hostname.clone()
        })
        .interact_text()
        .map_err(prompt_err)?;

    let port: u16 = Input::new()
        .with_prompt("WebUI port")
        .default(current.connection.port)
        .interact_text()
        .map_err(prompt_err)?;

    let use_https = Confirm::new()
        .with_prompt("Connect over HTTPS?")
        .default(current.connection.use_https)
        .interact()
        .map_err(prompt_err)?;

    // 2. Credentials
    let username: String = Input::new()
        .with_prompt("WebUI username (empty to skip authentication)")
        .default(current.connection.username.clone())
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;

    let mut password_field = None;
    if !username.is_empty() {
        let password = rpassword::prompt_password("WebUI password: ").map_err(prompt_err)?;

        if !password.is_empty() {
            let store_choices = &[
                "Store in system keyring (recommended)",
                "Save to config file (plaintext)",
            ];
            let store_selection = Select::new()
                .with_prompt("Where to store the password?")
                .items(store_choices)
                .default(0)
                .interact()
                .map_err(prompt_err)?;

            if store_selection == 0 {
                qbitctl_config::store_password_in_keyring(&password)?;
            } else {
                password_field = Some(password);
            }
        }
    }

    // 3. Add defaults
    let category: String = Input::new()
        .with_prompt("Default category for new torrents (empty for none)")
        .default(current.add.category.clone())
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;

    let save_path: String = Input::new()
        .with_prompt("Default save path (empty for the daemon's default)")
        .default(current.add.save_path.clone())
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;

    let mut cfg = Config {
        connection: ConnectionSettings {
            hostname,
            port,
            username,
            password: password_field,
            use_https,
            ..current.connection
        },
        ..current
    };
    cfg.add.category = category;
    cfg.add.save_path = save_path;

    qbitctl_config::save_config(&cfg)?;
    eprintln!("\nSaved. Try: qbitctl probe");
    Ok(())
}

// ── Show ────────────────────────────────────────────────────────────

fn show(global: &GlobalOpts) -> Result<(), CliError> {
    let mut cfg = qbitctl_config::load_config_or_default();

    // Never echo the stored password.
    if cfg.connection.password.is_some() {
        cfg.connection.password = Some("<redacted>".into());
    }

    let rendered = match global.output {
        OutputFormat::Json => output::render_json_pretty(&cfg),
        OutputFormat::JsonCompact => output::render_json_compact(&cfg),
        OutputFormat::Yaml => output::render_yaml(&cfg),
        // TOML is the config's native shape; table and plain both get it.
        OutputFormat::Table | OutputFormat::Plain => {
            toml::to_string_pretty(&cfg).map_err(qbitctl_config::ConfigError::from)?
        }
    };
    output::print_output(rendered.trim_end(), global.quiet);
    Ok(())
}
