//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use watchlog_lib::{MediaKind, ViewingStatus};

#[derive(Parser)]
#[command(name = "watchlog")]
#[command(about = "Keep track of the movies and series you watch", long_about = None)]
pub(crate) struct Cli {
    /// Path to the catalog database file (overrides settings.toml)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Fields shared by movies and series.
#[derive(Args, Clone)]
pub(crate) struct MediaArgs {
    /// Title of the movie or series
    pub title: String,

    /// Genre (e.g., Drama, Comedy)
    #[arg(short, long, default_value = "")]
    pub genre: String,

    /// Release year
    #[arg(short, long)]
    pub year: i32,

    /// Cast members, comma separated
    #[arg(short, long, value_delimiter = ',')]
    pub cast: Vec<String>,

    /// Initial viewing status (pending, watching, done, abandoned)
    #[arg(short, long, default_value = "pending")]
    pub status: ViewingStatus,

    /// Initial rating, 0.0 to 10.0 (kept only when the status is done)
    #[arg(short, long)]
    pub rating: Option<f64>,

    /// Add even if an entry with the same title, kind and year exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Add a movie to the catalog
    AddMovie {
        #[command(flatten)]
        media: MediaArgs,

        /// Running time in minutes
        #[arg(short, long)]
        duration: u32,
    },

    /// Add a series (without seasons) to the catalog
    AddSeries {
        #[command(flatten)]
        media: MediaArgs,
    },

    /// Add an empty season to a series
    AddSeason {
        /// Id of the series
        series_id: i64,

        /// Season number
        number: u32,

        /// Optional season title
        #[arg(short, long, default_value = "")]
        title: String,
    },

    /// Append an episode to a season of a series
    AddEpisode {
        /// Id of the series
        series_id: i64,

        /// Season number
        season: u32,

        /// Episode number
        number: u32,

        /// Running time in minutes
        #[arg(short, long)]
        duration: u32,

        /// Optional episode title
        #[arg(short, long, default_value = "")]
        title: String,

        /// Create the season if the series doesn't have it yet
        #[arg(long)]
        create_season: bool,
    },

    /// Change the viewing status and/or rating of an entry
    Update {
        /// Id of the movie or series
        id: i64,

        /// New viewing status (pending, watching, done, abandoned)
        #[arg(short, long)]
        status: Option<ViewingStatus>,

        /// New rating, 0.0 to 10.0 (reset to 0 unless the entry is done)
        #[arg(short, long)]
        rating: Option<f64>,
    },

    /// Remove a movie or series (series lose all seasons and episodes)
    Remove {
        /// Id of the movie or series
        id: i64,

        /// Kind of the entry (movie or series)
        #[arg(short, long)]
        kind: MediaKind,

        /// Confirm the removal (required; without this, shows preview only)
        #[arg(long)]
        confirm: bool,
    },

    /// List catalog entries
    List {
        /// Only entries with this viewing status
        #[arg(short, long)]
        status: Option<ViewingStatus>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one entry with its seasons and episodes
    Show {
        /// Id of the movie or series
        id: i64,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show collection statistics
    Stats {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Manage watchlog settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the settings file and the resolved database path
    Show,

    /// Print the settings file path
    Path,

    /// Save a default database path
    SetDb {
        /// Path to the catalog database file
        path: PathBuf,
    },

    /// Forget the saved database path
    ClearDb,
}
