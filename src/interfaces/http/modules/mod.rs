pub mod games;
pub mod health;
pub mod request_id;
