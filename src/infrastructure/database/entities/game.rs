//! Game entity

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// Game model - one catalog record
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "games")]
pub struct Model {
    /// Insertion sequence; the list order
    #[sea_orm(primary_key)]
    pub seq: i32,

    /// UUID v4, stored as its hyphenated string form
    #[sea_orm(unique)]
    pub id: String,

    pub name: String,

    pub publisher: String,

    /// Canonical decimal string, e.g. "29.99"
    pub price: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
