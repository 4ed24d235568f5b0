use thiserror::Error;

/// A field value rejected while building or mutating an entity.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Title must not be empty")]
    EmptyTitle,

    #[error("Release year {year} is outside {min}..={max}")]
    YearOutOfRange { year: i32, min: i32, max: i32 },

    /// A number or duration that must be strictly positive.
    #[error("{field} must be a positive integer, got {value}")]
    NotPositive { field: &'static str, value: i64 },

    #[error("Rating must be a number between 0.0 and 10.0, got {0}")]
    InvalidRating(f64),

    #[error("Season {0} already exists in this series")]
    DuplicateSeason(u32),

    #[error("Episode {0} already exists in this season")]
    DuplicateEpisode(u32),

    #[error("'{0}' is a movie; only series have seasons")]
    NotASeries(String),

    #[error("Unknown media kind: '{0}'")]
    UnknownKind(String),

    #[error("Unknown viewing status: '{0}'")]
    UnknownStatus(String),
}

impl ValidationError {
    pub(crate) fn not_positive(field: &'static str, value: impl Into<i64>) -> Self {
        Self::NotPositive {
            field,
            value: value.into(),
        }
    }
}
