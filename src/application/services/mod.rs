//! Application services

mod game;

pub use game::GameService;
