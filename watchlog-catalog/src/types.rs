//! Small value types shared by the entity model and the store.

use serde::{Serialize, Serializer};

use crate::error::ValidationError;

// ── Identity ────────────────────────────────────────────────────────────────

/// Storage identity of an entity.
///
/// Entities start out `Unsaved`; the store assigns `Saved(id)` after the
/// row is committed. Serializes as a nullable integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Identity {
    #[default]
    Unsaved,
    Saved(i64),
}

impl Identity {
    pub fn id(&self) -> Option<i64> {
        match self {
            Self::Unsaved => None,
            Self::Saved(id) => Some(*id),
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved(_))
    }
}

impl Serialize for Identity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.id().serialize(serializer)
    }
}

// ── Media Kind ──────────────────────────────────────────────────────────────

/// Whether a catalog entry is a movie or a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MediaKind {
    #[serde(rename = "FILME")]
    Movie,
    #[serde(rename = "SERIE")]
    Series,
}

impl MediaKind {
    /// Stored representation (`tipo` column).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "FILME",
            Self::Series => "SERIE",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Movie => "Movie",
            Self::Series => "Series",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for MediaKind {
    type Err = ValidationError;

    /// Accepts the stored name or a friendly alias, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "filme" | "movie" | "film" => Ok(Self::Movie),
            "serie" | "série" | "series" | "show" => Ok(Self::Series),
            _ => Err(ValidationError::UnknownKind(s.to_string())),
        }
    }
}

// ── Viewing Status ──────────────────────────────────────────────────────────

/// How far the user got with a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ViewingStatus {
    #[serde(rename = "PENDENTE")]
    Pending,
    #[serde(rename = "ASSISTINDO")]
    Watching,
    #[serde(rename = "CONCLUIDO")]
    Done,
    #[serde(rename = "ABANDONADO")]
    Abandoned,
}

impl Default for ViewingStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl ViewingStatus {
    pub const ALL: [ViewingStatus; 4] = [
        Self::Pending,
        Self::Watching,
        Self::Done,
        Self::Abandoned,
    ];

    /// Stored representation (`status` column).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDENTE",
            Self::Watching => "ASSISTINDO",
            Self::Done => "CONCLUIDO",
            Self::Abandoned => "ABANDONADO",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Watching => "Watching",
            Self::Done => "Done",
            Self::Abandoned => "Abandoned",
        }
    }
}

impl std::fmt::Display for ViewingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for ViewingStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pendente" | "pending" => Ok(Self::Pending),
            "assistindo" | "watching" => Ok(Self::Watching),
            "concluido" | "concluído" | "done" | "completed" => Ok(Self::Done),
            "abandonado" | "abandoned" | "dropped" => Ok(Self::Abandoned),
            _ => Err(ValidationError::UnknownStatus(s.to_string())),
        }
    }
}
