use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use watchlog_lib::{Media, ViewingStatus};

use crate::CliError;

use super::{format_minutes, id_label, rating_label, truncate_str};

/// List catalog entries, optionally filtered by status.
pub(crate) fn run_list(
    db: Option<PathBuf>,
    status: Option<ViewingStatus>,
    json: bool,
) -> Result<(), CliError> {
    let catalog = crate::open_catalog(db)?;
    let entries: Vec<&Media> = match status {
        Some(s) => catalog.by_status(s),
        None => catalog.media().iter().collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        log::info!(
            "{}",
            "No entries found".if_supports_color(Stdout, |t| t.dimmed()),
        );
        return Ok(());
    }

    log::info!(
        "{}",
        format!(
            "{:>5}  {:<6}  {:<32}  {:>4}  {:<10}  {:>6}  {:>8}",
            "ID", "Kind", "Title", "Year", "Status", "Rating", "Runtime"
        )
        .if_supports_color(Stdout, |t| t.bold()),
    );
    for media in &entries {
        log::info!(
            "{:>5}  {:<6}  {:<32}  {:>4}  {:<10}  {:>6}  {:>8}",
            id_label(media),
            media.kind().display_name(),
            truncate_str(media.title(), 32),
            media.year(),
            media.status().display_name(),
            rating_label(media.rating()),
            format_minutes(media.total_minutes()),
        );
    }
    crate::log_blank();
    log::info!("{} entries", entries.len());

    Ok(())
}

/// Show one entry with its seasons and episodes.
pub(crate) fn run_show(db: Option<PathBuf>, id: i64, json: bool) -> Result<(), CliError> {
    let catalog = crate::open_catalog(db)?;
    let Some(media) = catalog.find(id) else {
        log::warn!("No entry with id {}", id);
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(media)?);
        return Ok(());
    }

    log::info!("{}", media.title().if_supports_color(Stdout, |t| t.bold()));
    log::info!("  Id:      {}", id_label(media));
    log::info!("  Kind:    {}", media.kind());
    log::info!("  Genre:   {}", media.genre());
    log::info!("  Year:    {}", media.year());
    if !media.cast().is_empty() {
        log::info!("  Cast:    {}", media.cast().join(", "));
    }
    log::info!("  Status:  {}", media.status());
    log::info!("  Rating:  {}", rating_label(media.rating()));
    log::info!("  Runtime: {}", format_minutes(media.total_minutes()));

    for season in media.seasons() {
        crate::log_blank();
        let heading = if season.title().is_empty() {
            format!("Season {}", season.number())
        } else {
            format!("Season {}: {}", season.number(), season.title())
        };
        log::info!(
            "  {} ({} episodes, {})",
            heading.if_supports_color(Stdout, |t| t.cyan()),
            season.episode_count(),
            format_minutes(season.total_minutes()),
        );
        for episode in season.episodes() {
            log::info!(
                "    E{:02}  {:<40}  {:>4} min",
                episode.number(),
                truncate_str(episode.title(), 40),
                episode.duration_minutes(),
            );
        }
    }

    Ok(())
}
