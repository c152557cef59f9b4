use std::path::PathBuf;

/// Errors from applying or parsing moves.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Invalid move, column {} out of range. Columns must be between 1 and {}", .column + 1, crate::WIDTH)]
    ColumnOutOfRange { column: usize },

    #[error("Invalid move, column {} full", .column + 1)]
    ColumnFull { column: usize },

    #[error("Invalid move, the game is already over")]
    GameOver,

    #[error("could not parse '{found}' at position {position} as a valid move")]
    ParseMove { position: usize, found: char },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Errors from reading or writing leaderboard files.
#[derive(Debug, thiserror::Error)]
pub enum LeaderboardError {
    #[error("failed to access leaderboard {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed leaderboard line {line} in {path}: {content:?}")]
    Malformed {
        path: PathBuf,
        line: usize,
        content: String,
    },
}
