//! Game domain entity

use rust_decimal::Decimal;
use uuid::Uuid;

/// A catalog record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub id: Uuid,
    pub name: String,
    pub publisher: String,
    pub price: Decimal,
}

impl Game {
    /// Whether this record holds the given `(name, publisher)` uniqueness key.
    ///
    /// Comparison is exact, matching the `BINARY` collation of the SQL store.
    pub fn has_key(&self, name: &str, publisher: &str) -> bool {
        self.name == name && self.publisher == publisher
    }

    /// Replace every mutable field with the candidate's values.
    pub fn apply(&mut self, data: NewGame) {
        self.name = data.name;
        self.publisher = data.publisher;
        self.price = data.price;
    }
}

/// Candidate data for inserting or fully replacing a game. Carries no id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGame {
    pub name: String,
    pub publisher: String,
    pub price: Decimal,
}

impl NewGame {
    pub fn new(name: impl Into<String>, publisher: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            publisher: publisher.into(),
            price,
        }
    }

    /// Assign a freshly generated identifier.
    pub fn into_game(self) -> Game {
        self.into_game_with_id(Uuid::new_v4())
    }

    pub fn into_game_with_id(self, id: Uuid) -> Game {
        Game {
            id,
            name: self.name,
            publisher: self.publisher,
            price: self.price,
        }
    }
}
