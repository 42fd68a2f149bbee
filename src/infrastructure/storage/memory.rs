//! In-memory game repository

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use rust_decimal::Decimal;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::{Game, GameRepository, RepoResult, RepositoryError};

type GameKey = (String, String);

struct StoredGame {
    /// Insertion sequence, used as the list order.
    seq: u64,
    game: Game,
}

/// In-memory storage for development and testing.
///
/// Readers go straight to the maps. Writers are serialised by `write_lock`,
/// which makes every uniqueness and existence check atomic with the write
/// that follows it.
pub struct InMemoryGameRepository {
    games: DashMap<Uuid, StoredGame>,
    keys: DashMap<GameKey, Uuid>,
    sequence: AtomicU64,
    write_lock: Mutex<()>,
}

impl InMemoryGameRepository {
    pub fn new() -> Self {
        Self {
            games: DashMap::new(),
            keys: DashMap::new(),
            sequence: AtomicU64::new(1),
            write_lock: Mutex::new(()),
        }
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

impl Default for InMemoryGameRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn key_of(game: &Game) -> GameKey {
    (game.name.clone(), game.publisher.clone())
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    async fn create(&self, game: Game) -> RepoResult<Game> {
        let _guard = self.write_lock.lock().await;

        let key = key_of(&game);
        if self.keys.contains_key(&key) {
            return Err(RepositoryError::Duplicate);
        }

        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        self.keys.insert(key, game.id);
        self.games.insert(
            game.id,
            StoredGame {
                seq,
                game: game.clone(),
            },
        );
        Ok(game)
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Game>> {
        Ok(self.games.get(&id).map(|e| e.game.clone()))
    }

    async fn find_by_name_and_publisher(
        &self,
        name: &str,
        publisher: &str,
    ) -> RepoResult<Option<Game>> {
        let key = (name.to_string(), publisher.to_string());
        let Some(id) = self.keys.get(&key).map(|e| *e.value()) else {
            return Ok(None);
        };
        self.find_by_id(id).await
    }

    async fn page(&self, offset: u64, limit: u64) -> RepoResult<Vec<Game>> {
        let mut entries: Vec<(u64, Game)> = self
            .games
            .iter()
            .map(|e| (e.seq, e.game.clone()))
            .collect();
        entries.sort_by_key(|(seq, _)| *seq);

        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(entries
            .into_iter()
            .skip(skip)
            .take(take)
            .map(|(_, game)| game)
            .collect())
    }

    async fn update(&self, game: Game) -> RepoResult<()> {
        let _guard = self.write_lock.lock().await;

        let old_key = match self.games.get(&game.id) {
            Some(existing) => key_of(&existing.game),
            None => return Err(RepositoryError::NotFound),
        };

        let new_key = key_of(&game);
        if new_key != old_key {
            if let Some(holder) = self.keys.get(&new_key) {
                if *holder.value() != game.id {
                    return Err(RepositoryError::Duplicate);
                }
            }
            self.keys.remove(&old_key);
            self.keys.insert(new_key, game.id);
        }

        if let Some(mut stored) = self.games.get_mut(&game.id) {
            stored.game = game;
        }
        Ok(())
    }

    async fn update_price(&self, id: Uuid, price: Decimal) -> RepoResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut stored = self.games.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        stored.game.price = price;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let _guard = self.write_lock.lock().await;

        let (_, stored) = self.games.remove(&id).ok_or(RepositoryError::NotFound)?;
        self.keys.remove(&key_of(&stored.game));
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewGame;

    fn game(name: &str, publisher: &str) -> Game {
        NewGame::new(name, publisher, Decimal::new(1000, 2)).into_game()
    }

    #[tokio::test]
    async fn create_rejects_duplicate_key() {
        let repo = InMemoryGameRepository::new();
        repo.create(game("Chrono Trigger", "Square")).await.unwrap();

        let err = repo
            .create(game("Chrono Trigger", "Square"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Duplicate));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn same_name_different_publisher_is_allowed() {
        let repo = InMemoryGameRepository::new();
        repo.create(game("Tetris", "Nintendo")).await.unwrap();
        repo.create(game("Tetris", "Sega")).await.unwrap();
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn page_follows_insertion_order() {
        let repo = InMemoryGameRepository::new();
        let mut ids = Vec::new();
        for i in 0..7 {
            let created = repo.create(game(&format!("Game {i}"), "Pub")).await.unwrap();
            ids.push(created.id);
        }

        let first: Vec<Uuid> = repo.page(0, 3).await.unwrap().iter().map(|g| g.id).collect();
        let last: Vec<Uuid> = repo.page(6, 3).await.unwrap().iter().map(|g| g.id).collect();
        assert_eq!(first, ids[0..3]);
        assert_eq!(last, ids[6..7]);
        assert!(repo.page(7, 3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_moves_the_uniqueness_key() {
        let repo = InMemoryGameRepository::new();
        let mut stored = repo.create(game("Secret of Mana", "Square")).await.unwrap();

        stored.name = "Secret of Evermore".into();
        repo.update(stored.clone()).await.unwrap();

        assert!(repo
            .find_by_name_and_publisher("Secret of Mana", "Square")
            .await
            .unwrap()
            .is_none());
        let found = repo
            .find_by_name_and_publisher("Secret of Evermore", "Square")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, stored.id);

        // The old key is free again.
        repo.create(game("Secret of Mana", "Square")).await.unwrap();
    }

    #[tokio::test]
    async fn update_onto_taken_key_is_rejected() {
        let repo = InMemoryGameRepository::new();
        repo.create(game("Final Fantasy VI", "Square")).await.unwrap();
        let mut other = repo.create(game("Final Fantasy IV", "Square")).await.unwrap();

        other.name = "Final Fantasy VI".into();
        let err = repo.update(other).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Duplicate));
    }

    #[tokio::test]
    async fn update_and_delete_missing_rows_report_not_found() {
        let repo = InMemoryGameRepository::new();
        let ghost = game("Ghost", "Nobody");

        assert!(matches!(
            repo.update(ghost.clone()).await.unwrap_err(),
            RepositoryError::NotFound
        ));
        assert!(matches!(
            repo.delete(ghost.id).await.unwrap_err(),
            RepositoryError::NotFound
        ));
    }

    #[tokio::test]
    async fn delete_releases_the_key() {
        let repo = InMemoryGameRepository::new();
        let stored = repo.create(game("Earthbound", "Nintendo")).await.unwrap();
        repo.delete(stored.id).await.unwrap();

        assert!(repo.is_empty());
        assert!(repo.find_by_id(stored.id).await.unwrap().is_none());
        repo.create(game("Earthbound", "Nintendo")).await.unwrap();
    }

    #[tokio::test]
    async fn update_price_touches_only_the_price() {
        let repo = InMemoryGameRepository::new();
        let stored = repo.create(game("Chrono Trigger", "Square")).await.unwrap();

        repo.update_price(stored.id, Decimal::new(999, 2)).await.unwrap();

        let found = repo.find_by_id(stored.id).await.unwrap().unwrap();
        assert_eq!(found.price, Decimal::new(999, 2));
        assert_eq!(found.name, "Chrono Trigger");
        assert_eq!(found.publisher, "Square");
        assert!(repo
            .find_by_name_and_publisher("Chrono Trigger", "Square")
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn update_price_of_missing_row_is_not_found() {
        let repo = InMemoryGameRepository::new();
        let err = repo
            .update_price(Uuid::new_v4(), Decimal::ONE)
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
        assert!(repo.is_empty());
    }
}
