use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use watchlog_lib::{RatingOutcome, ViewingStatus};

use crate::CliError;

/// Change the viewing status and/or rating of an entry.
pub(crate) fn run_update(
    db: Option<PathBuf>,
    id: i64,
    status: Option<ViewingStatus>,
    rating: Option<f64>,
) -> Result<(), CliError> {
    if status.is_none() && rating.is_none() {
        return Err(CliError::usage(
            "Nothing to update: pass --status and/or --rating",
        ));
    }

    let mut catalog = crate::open_catalog(db)?;
    let outcome = catalog.set_viewing(id, status, rating)?;

    if let Some(media) = catalog.find(id) {
        log::info!(
            "{} {}",
            "Updated".if_supports_color(Stdout, |t| t.green()),
            media.title().if_supports_color(Stdout, |t| t.bold()),
        );
        log::info!("  Status: {}", media.status());
        log::info!("  Rating: {}", super::rating_label(media.rating()));
    }
    if let Some(RatingOutcome::Applied(applied)) = outcome {
        if rating.is_some_and(|r| r != applied) {
            log::warn!("Rating was clamped to {:.1}", applied);
        }
    }

    catalog.close()?;
    Ok(())
}
