//! Game aggregate
//!
//! Contains the Game entity and its repository interface.

pub mod model;
pub mod repository;

pub use model::{Game, NewGame};
pub use repository::GameRepository;
