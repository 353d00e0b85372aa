use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MysliError {
    #[error("Note not found: {id}")]
    NoteNotFound { id: String },

    #[error("Note id '{prefix}' is ambiguous - matches {count} notes")]
    AmbiguousNoteId { prefix: String, count: usize },

    #[error("Note content is empty")]
    EmptyNote,

    #[error("Invalid pattern for category '{category}': {pattern} ({source})")]
    InvalidPattern {
        category: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Category '{name}' has an empty icon")]
    EmptyIcon { name: String },

    #[error("New category '{name}' must declare an icon")]
    MissingIcon { name: String },

    #[error("Fallback category '{name}' is not defined")]
    MissingFallback { name: String },

    #[error("Failed to parse config file {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Unknown config key: {key}")]
    ConfigKeyNotFound { key: String },

    #[error("Invalid value for {key}: {message}")]
    InvalidConfigValue { key: String, message: String },

    #[error("Failed to parse notes file {path}: {message}")]
    NotesParse { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Home directory not found")]
    HomeNotFound,
}

pub type Result<T> = std::result::Result<T, MysliError>;

impl MysliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoteNotFound { .. } => 2,
            Self::AmbiguousNoteId { .. } => 3,
            Self::EmptyNote => 4,
            Self::InvalidPattern { .. }
            | Self::EmptyIcon { .. }
            | Self::MissingIcon { .. }
            | Self::MissingFallback { .. } => 5,
            Self::ConfigParse { .. }
            | Self::ConfigKeyNotFound { .. }
            | Self::InvalidConfigValue { .. } => 6,
            _ => 1,
        }
    }
}
