//! Game repository interface

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::model::Game;
use crate::shared::errors::RepoResult;

/// Storage for game records.
///
/// Implementations must enforce `(name, publisher)` uniqueness atomically in
/// `create` and `update` (returning [`RepositoryError::Duplicate`]) and must
/// report a missing row from `update`/`update_price`/`delete` as
/// [`RepositoryError::NotFound`]. `update_price` writes the price column
/// only. `page` returns records in a stable order.
///
/// [`RepositoryError::Duplicate`]: crate::shared::errors::RepositoryError::Duplicate
/// [`RepositoryError::NotFound`]: crate::shared::errors::RepositoryError::NotFound
#[async_trait]
pub trait GameRepository: Send + Sync {
    async fn create(&self, game: Game) -> RepoResult<Game>;
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Game>>;
    async fn find_by_name_and_publisher(
        &self,
        name: &str,
        publisher: &str,
    ) -> RepoResult<Option<Game>>;
    async fn page(&self, offset: u64, limit: u64) -> RepoResult<Vec<Game>>;
    async fn update(&self, game: Game) -> RepoResult<()>;
    async fn update_price(&self, id: Uuid, price: Decimal) -> RepoResult<()>;
    async fn delete(&self, id: Uuid) -> RepoResult<()>;
}
