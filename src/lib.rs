//! # Game Catalog
//!
//! REST service for a catalog of video games: paginated listing, lookup by
//! id, insert, full update, price update and removal.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: the `Game` entity and the repository contract
//! - **application**: `GameService`, which enforces the catalog invariants
//! - **infrastructure**: SeaORM/SQLite and in-memory repositories
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: errors, pagination and shutdown plumbing
//! - **server**: runtime lifecycle used by the binary

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use application::GameService;
pub use domain::{Game, GameError, GameRepository, NewGame};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, InMemoryGameRepository, SeaOrmGameRepository};

// Re-export API router
pub use interfaces::http::create_api_router;
