use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use watchlog_lib::{Media, ViewingStatus};

use crate::CliError;

use super::truncate_str;

pub(crate) fn run_stats(db: Option<PathBuf>, json: bool) -> Result<(), CliError> {
    let catalog = crate::open_catalog(db)?;
    let stats = catalog.statistics();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    log::info!(
        "{}",
        "Catalog Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();
    log::info!("  Entries:        {:>8}", stats.total);
    log::info!("  Movies:         {:>8}", stats.movies);
    log::info!("  Series:         {:>8}", stats.series);
    crate::log_blank();
    for status in ViewingStatus::ALL {
        log::info!(
            "  {:<15} {:>8}",
            format!("{}:", status.display_name()),
            stats.status_count(status),
        );
    }
    crate::log_blank();
    log::info!(
        "  Average rating: {:>8.2} ({} rated)",
        stats.average_rating,
        stats.rated,
    );
    log::info!("  Hours watched:  {:>8.1}", stats.watched_hours);

    print_top("Top movies", &stats.top_movies);
    print_top("Top series", &stats.top_series);

    if !stats.genres.is_empty() {
        crate::log_blank();
        log::info!("{}", "Genres".if_supports_color(Stdout, |t| t.bold()));
        for (genre, count) in &stats.genres {
            let name = if genre.is_empty() { "(none)" } else { genre };
            log::info!(
                "  {:<24} {:>4} ({} movies, {} series)",
                truncate_str(name, 24),
                count.total(),
                count.movies,
                count.series,
            );
        }
    }

    Ok(())
}

fn print_top(heading: &str, entries: &[Media]) {
    if entries.is_empty() {
        return;
    }
    crate::log_blank();
    log::info!("{}", heading.if_supports_color(Stdout, |t| t.bold()));
    for (rank, media) in entries.iter().enumerate() {
        log::info!(
            "  {:>2}. {:<40} {:>4.1}",
            rank + 1,
            truncate_str(media.title(), 40),
            media.rating(),
        );
    }
}
