use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use watchlog_lib::MediaKind;

use crate::CliError;

/// Remove a movie or a series with all its seasons and episodes.
pub(crate) fn run_remove(
    db: Option<PathBuf>,
    id: i64,
    kind: MediaKind,
    confirm: bool,
) -> Result<(), CliError> {
    let mut catalog = crate::open_catalog(db)?;

    if !confirm {
        match catalog.find(id).filter(|m| m.kind() == kind) {
            Some(media) => {
                log::warn!("This will permanently remove:\n  {}", media);
                if media.is_series() {
                    log::warn!(
                        "  including {} season(s) and {} episode(s)",
                        media.seasons().len(),
                        media.episode_count(),
                    );
                }
                log::info!("Re-run with --confirm to proceed:");
                log::info!(
                    "  watchlog remove {} --kind {} --confirm",
                    id,
                    kind.display_name().to_lowercase(),
                );
            }
            None => log::warn!("No {} with id {}", kind.display_name().to_lowercase(), id),
        }
        return Ok(());
    }

    let removed = catalog.remove(id, kind)?;
    log::info!(
        "{} {}",
        "Removed".if_supports_color(Stdout, |t| t.green()),
        removed.title().if_supports_color(Stdout, |t| t.bold()),
    );

    catalog.close()?;
    Ok(())
}
