use thiserror::Error;
use uuid::Uuid;

/// Failures reported by a [`GameRepository`](crate::domain::GameRepository).
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The row addressed by an update or delete does not exist.
    #[error("record not found")]
    NotFound,

    /// A write would break the `(name, publisher)` uniqueness constraint.
    #[error("duplicate (name, publisher) pair")]
    Duplicate,

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A stored row could not be decoded back into a domain value.
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// Outcome of a failed game service operation.
///
/// `AlreadyExists` and `NotFound` are the domain outcomes; `Storage` carries
/// infrastructure failures through unchanged.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("a game named {name:?} already exists for publisher {publisher:?}")]
    AlreadyExists { name: String, publisher: String },

    #[error("game {0} does not exist")]
    NotFound(Uuid),

    #[error(transparent)]
    Storage(RepositoryError),
}

impl GameError {
    pub fn already_exists(name: impl Into<String>, publisher: impl Into<String>) -> Self {
        Self::AlreadyExists {
            name: name.into(),
            publisher: publisher.into(),
        }
    }

    /// `true` for the outcomes a caller is expected to handle, as opposed to
    /// infrastructure failures.
    pub fn is_domain(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Result type for domain operations
pub type GameResult<T> = Result<T, GameError>;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepositoryError>;
