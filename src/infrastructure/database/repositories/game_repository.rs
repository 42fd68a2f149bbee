//! SeaORM implementation of GameRepository

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::prelude::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    NotSet, QueryOrder, QuerySelect, Set, SqlErr,
};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{Game, GameRepository, RepoResult, RepositoryError};
use crate::infrastructure::database::entities::game;

// ── Conversion helpers ──────────────────────────────────────────

/// Unique-index violations become `Duplicate`; everything else is a plain
/// database failure.
fn write_err(e: DbErr) -> RepositoryError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => RepositoryError::Duplicate,
        _ => RepositoryError::Database(e),
    }
}

fn entity_to_domain(m: game::Model) -> RepoResult<Game> {
    let id = Uuid::parse_str(&m.id)
        .map_err(|e| RepositoryError::Corrupt(format!("game id {:?}: {}", m.id, e)))?;
    let price = m
        .price
        .parse::<Decimal>()
        .map_err(|e| RepositoryError::Corrupt(format!("price of game {}: {}", id, e)))?;
    Ok(Game {
        id,
        name: m.name,
        publisher: m.publisher,
        price,
    })
}

// ── SeaOrmGameRepository ────────────────────────────────────────

pub struct SeaOrmGameRepository {
    db: DatabaseConnection,
}

impl SeaOrmGameRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GameRepository for SeaOrmGameRepository {
    async fn create(&self, g: Game) -> RepoResult<Game> {
        let now = Utc::now();
        let model = game::ActiveModel {
            seq: NotSet,
            id: Set(g.id.to_string()),
            name: Set(g.name),
            publisher: Set(g.publisher),
            price: Set(g.price.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let result = model.insert(&self.db).await.map_err(write_err)?;
        debug!(game_id = %result.id, "Game row inserted");
        entity_to_domain(result)
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Game>> {
        let model = game::Entity::find()
            .filter(game::Column::Id.eq(id.to_string()))
            .one(&self.db)
            .await?;
        model.map(entity_to_domain).transpose()
    }

    async fn find_by_name_and_publisher(
        &self,
        name: &str,
        publisher: &str,
    ) -> RepoResult<Option<Game>> {
        let model = game::Entity::find()
            .filter(game::Column::Name.eq(name))
            .filter(game::Column::Publisher.eq(publisher))
            .one(&self.db)
            .await?;
        model.map(entity_to_domain).transpose()
    }

    async fn page(&self, offset: u64, limit: u64) -> RepoResult<Vec<Game>> {
        let models = game::Entity::find()
            .order_by_asc(game::Column::Seq)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;
        models.into_iter().map(entity_to_domain).collect()
    }

    async fn update(&self, g: Game) -> RepoResult<()> {
        let result = game::Entity::update_many()
            .col_expr(game::Column::Name, Expr::value(g.name))
            .col_expr(game::Column::Publisher, Expr::value(g.publisher))
            .col_expr(game::Column::Price, Expr::value(g.price.to_string()))
            .col_expr(game::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(game::Column::Id.eq(g.id.to_string()))
            .exec(&self.db)
            .await
            .map_err(write_err)?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn update_price(&self, id: Uuid, price: Decimal) -> RepoResult<()> {
        let result = game::Entity::update_many()
            .col_expr(game::Column::Price, Expr::value(price.to_string()))
            .col_expr(game::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(game::Column::Id.eq(id.to_string()))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let result = game::Entity::delete_many()
            .filter(game::Column::Id.eq(id.to_string()))
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
