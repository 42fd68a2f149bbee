//! HTTP REST API interfaces
//!
//! - `common`: response envelope and validating extractors
//! - `modules`: request handlers per resource, plus request-id middleware
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc};
