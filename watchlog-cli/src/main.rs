//! watchlog CLI
//!
//! Command-line interface for a personal movie and series catalog.

mod cli_types;
mod commands;
mod error;

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use watchlog_lib::Catalog;

use cli_types::{Cli, Commands, ConfigAction};
pub(crate) use error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logger(cli.quiet, cli.verbose);

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let db = cli.db;
    match cli.command {
        Commands::AddMovie { media, duration } => commands::add::run_add_movie(db, media, duration),
        Commands::AddSeries { media } => commands::add::run_add_series(db, media),
        Commands::AddSeason {
            series_id,
            number,
            title,
        } => commands::add::run_add_season(db, series_id, number, title),
        Commands::AddEpisode {
            series_id,
            season,
            number,
            duration,
            title,
            create_season,
        } => commands::add::run_add_episode(
            db,
            series_id,
            season,
            number,
            duration,
            title,
            create_season,
        ),
        Commands::Update { id, status, rating } => {
            commands::update::run_update(db, id, status, rating)
        }
        Commands::Remove { id, kind, confirm } => {
            commands::remove::run_remove(db, id, kind, confirm)
        }
        Commands::List { status, json } => commands::list::run_list(db, status, json),
        Commands::Show { id, json } => commands::list::run_show(db, id, json),
        Commands::Stats { json } => commands::stats::run_stats(db, json),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(db),
            ConfigAction::Path => commands::config::run_config_path(),
            ConfigAction::SetDb { path } => commands::config::run_config_set_db(path),
            ConfigAction::ClearDb => commands::config::run_config_clear_db(),
        },
    }
}

/// Install the logger that carries all command output.
///
/// Info lines print bare so commands can use `log::info!` as their stdout.
/// `--verbose` adds debug records with timestamps; `--quiet` keeps warnings
/// and errors only. `RUST_LOG` overrides both.
fn init_logger(quiet: bool, verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else if quiet {
        log::LevelFilter::Warn
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .format(move |buf, record| match record.level() {
            log::Level::Info if !verbose => writeln!(buf, "{}", record.args()),
            log::Level::Error => writeln!(
                buf,
                "{} {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                record.args()
            ),
            log::Level::Warn => writeln!(
                buf,
                "{} {}",
                "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
                record.args()
            ),
            level => {
                let ts = buf.timestamp_millis();
                writeln!(
                    buf,
                    "[{} {:<5} {}] {}",
                    ts,
                    level,
                    record.target(),
                    record.args()
                )
            }
        })
        .init();
}

/// Print an empty output line.
pub(crate) fn log_blank() {
    log::info!("");
}

/// Open the catalog at the resolved database path, creating it if needed.
pub(crate) fn open_catalog(db: Option<PathBuf>) -> Result<Catalog, CliError> {
    let path = watchlog_lib::settings::resolve_database_path(db);
    watchlog_lib::settings::ensure_parent_dir(&path)?;
    log::debug!("Using catalog database {}", path.display());
    Ok(Catalog::open_path(&path)?)
}
