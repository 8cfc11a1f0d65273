//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod gemini;
pub mod postgres;

pub use gemini::GeminiClient;
pub use postgres::{PostgresProductRepository, PostgresUserRepository};
