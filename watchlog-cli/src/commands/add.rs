use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use watchlog_lib::{Catalog, Episode, Media, MediaKind, Season, ViewingStatus};

use crate::CliError;
use crate::cli_types::MediaArgs;

pub(crate) fn run_add_movie(
    db: Option<PathBuf>,
    args: MediaArgs,
    duration: u32,
) -> Result<(), CliError> {
    let media = Media::movie(&args.title, &args.genre, args.year, duration, args.cast.clone())?;
    add_media(db, media, &args)
}

pub(crate) fn run_add_series(db: Option<PathBuf>, args: MediaArgs) -> Result<(), CliError> {
    let media = Media::series(&args.title, &args.genre, args.year, args.cast.clone())?;
    add_media(db, media, &args)
}

fn add_media(db: Option<PathBuf>, media: Media, args: &MediaArgs) -> Result<(), CliError> {
    let mut media = media.with_status(args.status);
    if let Some(rating) = args.rating {
        media = media.with_rating(rating)?;
        if rating > 0.0 && args.status != ViewingStatus::Done {
            log::warn!(
                "Only finished entries keep a rating; {:.1} was reset to 0.0",
                rating
            );
        }
    }

    let mut catalog = crate::open_catalog(db)?;

    if let Some(existing) = catalog.find_duplicate(&media) {
        if !args.force {
            log::warn!(
                "'{}' ({}) is already in the catalog with id {}",
                existing.title(),
                existing.year(),
                super::id_label(existing),
            );
            log::info!("Re-run with --force to add it anyway.");
            return Ok(());
        }
    }

    let kind = media.kind();
    let title = media.title().to_string();
    let id = catalog.add(media)?;

    log::info!(
        "{} {} '{}' with id {}",
        "Added".if_supports_color(Stdout, |t| t.green()),
        kind.display_name().to_lowercase(),
        title.if_supports_color(Stdout, |t| t.bold()),
        id.if_supports_color(Stdout, |t| t.cyan()),
    );
    if kind == MediaKind::Series {
        log::info!("Add seasons with 'watchlog add-season {} <number>'.", id);
    }

    catalog.close()?;
    Ok(())
}

pub(crate) fn run_add_season(
    db: Option<PathBuf>,
    series_id: i64,
    number: u32,
    title: String,
) -> Result<(), CliError> {
    let season = Season::new(number, title)?;
    let mut catalog = crate::open_catalog(db)?;
    let id = catalog.add_season(series_id, season)?;

    log::info!(
        "{} season {} to {} (season id {})",
        "Added".if_supports_color(Stdout, |t| t.green()),
        number,
        series_title(&catalog, series_id).if_supports_color(Stdout, |t| t.bold()),
        id,
    );

    catalog.close()?;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn run_add_episode(
    db: Option<PathBuf>,
    series_id: i64,
    season_number: u32,
    number: u32,
    duration: u32,
    title: String,
    create_season: bool,
) -> Result<(), CliError> {
    let episode = Episode::new(number, title, duration)?;
    let mut catalog = crate::open_catalog(db)?;

    let has_season = catalog
        .find_series(series_id)
        .is_some_and(|s| s.season(season_number).is_some());
    if !has_season && create_season {
        catalog.add_season(series_id, Season::new(season_number, "")?)?;
        log::info!("Created season {}", season_number);
    }

    let id = catalog.append_episode(series_id, season_number, episode)?;

    log::info!(
        "{} S{:02}E{:02} to {} (episode id {})",
        "Added".if_supports_color(Stdout, |t| t.green()),
        season_number,
        number,
        series_title(&catalog, series_id).if_supports_color(Stdout, |t| t.bold()),
        id,
    );

    catalog.close()?;
    Ok(())
}

fn series_title(catalog: &Catalog, series_id: i64) -> String {
    catalog
        .find_series(series_id)
        .map(|s| format!("'{}'", s.title()))
        .unwrap_or_else(|| format!("series {}", series_id))
}
