pub mod services;

// Re-export key types for convenience
pub use services::GameService;
