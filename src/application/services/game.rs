//! Game catalog business logic service

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::domain::{Game, GameError, GameRepository, GameResult, NewGame, RepositoryError};
use crate::shared::pagination::PageRequest;

/// Translate a repository write failure for `game` into a domain outcome.
///
/// The repository's own checks are the source of truth: they still fire when
/// a concurrent writer slipped in after the service's fast-path check.
fn write_error(e: RepositoryError, game: &Game) -> GameError {
    match e {
        RepositoryError::NotFound => GameError::NotFound(game.id),
        RepositoryError::Duplicate => {
            GameError::already_exists(game.name.clone(), game.publisher.clone())
        }
        other => GameError::Storage(other),
    }
}

/// Service for catalog operations.
///
/// Holds no state besides the repository handle, so any number of instances
/// may share one repository.
pub struct GameService {
    repo: Arc<dyn GameRepository>,
}

impl GameService {
    pub fn new(repo: Arc<dyn GameRepository>) -> Self {
        Self { repo }
    }

    /// One page of the catalog in insertion order. Pages past the end are
    /// empty.
    pub async fn list(&self, page: PageRequest) -> GameResult<Vec<Game>> {
        self.repo
            .page(page.offset(), page.limit())
            .await
            .map_err(GameError::Storage)
    }

    pub async fn get_by_id(&self, id: Uuid) -> GameResult<Game> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(GameError::Storage)?
            .ok_or(GameError::NotFound(id))
    }

    /// Insert a new game under a freshly generated identifier.
    pub async fn insert(&self, candidate: NewGame) -> GameResult<Game> {
        if self.find_holder(&candidate.name, &candidate.publisher).await?.is_some() {
            return Err(GameError::already_exists(candidate.name, candidate.publisher));
        }

        let game = candidate.into_game();
        let stored = self
            .repo
            .create(game.clone())
            .await
            .map_err(|e| write_error(e, &game))?;

        info!(
            game_id = %stored.id,
            name = %stored.name,
            publisher = %stored.publisher,
            "Game inserted"
        );
        Ok(stored)
    }

    /// Replace name, publisher and price of an existing game.
    ///
    /// The new `(name, publisher)` pair may not belong to any other game.
    pub async fn update(&self, id: Uuid, data: NewGame) -> GameResult<()> {
        let mut game = self.get_by_id(id).await?;

        if let Some(holder) = self.find_holder(&data.name, &data.publisher).await? {
            if holder.id != id {
                return Err(GameError::already_exists(data.name, data.publisher));
            }
        }

        game.apply(data);
        self.repo
            .update(game.clone())
            .await
            .map_err(|e| write_error(e, &game))?;

        info!(
            game_id = %id,
            name = %game.name,
            publisher = %game.publisher,
            "Game updated"
        );
        Ok(())
    }

    /// Set the price of an existing game. Name and publisher are left as the
    /// repository holds them, even if another writer changed them meanwhile.
    pub async fn update_price(&self, id: Uuid, price: Decimal) -> GameResult<()> {
        self.repo.update_price(id, price).await.map_err(|e| match e {
            RepositoryError::NotFound => GameError::NotFound(id),
            other => GameError::Storage(other),
        })?;

        info!(game_id = %id, price = %price, "Game price updated");
        Ok(())
    }

    pub async fn remove(&self, id: Uuid) -> GameResult<()> {
        self.repo.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound => GameError::NotFound(id),
            other => GameError::Storage(other),
        })?;

        info!(game_id = %id, "Game removed");
        Ok(())
    }

    async fn find_holder(&self, name: &str, publisher: &str) -> GameResult<Option<Game>> {
        self.repo
            .find_by_name_and_publisher(name, publisher)
            .await
            .map_err(GameError::Storage)
    }
}

// ── Tests ──────────────────────────────────────────────────────
