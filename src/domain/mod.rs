pub mod game;

// Re-export commonly used types
pub use game::{Game, GameRepository, NewGame};

pub use crate::shared::errors::{GameError, GameResult, RepoResult, RepositoryError};
