//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod product_repo;
pub mod user_repo;


pub use product_repo::PostgresProductRepository;
pub use user_repo::PostgresUserRepository;
