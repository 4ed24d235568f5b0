use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use watchlog_lib::settings;

use crate::CliError;

/// Show the settings file and where the catalog database resolves to.
pub(crate) fn run_config_show(db: Option<PathBuf>) -> Result<(), CliError> {
    let path = settings::settings_path();

    log::info!(
        "{}",
        "watchlog Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    let source = if db.is_some() {
        "--db"
    } else if settings::resolve_database_path(None) != settings::default_database_path() {
        "settings.toml"
    } else {
        "default"
    };
    let resolved = settings::resolve_database_path(db);
    log::info!(
        "  Database:      {} {}",
        resolved.display().if_supports_color(Stdout, |t| t.cyan()),
        format!("({})", source).if_supports_color(Stdout, |t| t.dimmed()),
    );

    if let Some(contents) = settings::load_settings_string() {
        crate::log_blank();
        for line in contents.lines() {
            log::info!("  {}", line);
        }
    }

    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    log::info!("{}", settings::settings_path().display());
    Ok(())
}

/// Save a default database path in settings.toml.
pub(crate) fn run_config_set_db(path: PathBuf) -> Result<(), CliError> {
    let path = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()?.join(path)
    };
    settings::save_database_path(Some(&path))
        .map_err(|e| CliError::config(format!("Failed to save settings: {}", e)))?;
    log::info!(
        "{} Database path set to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display(),
    );
    Ok(())
}

/// Remove the saved database path from settings.toml.
pub(crate) fn run_config_clear_db() -> Result<(), CliError> {
    settings::save_database_path(None)
        .map_err(|e| CliError::config(format!("Failed to save settings: {}", e)))?;
    log::info!(
        "{} Database path cleared; using {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        settings::default_database_path().display(),
    );
    Ok(())
}
