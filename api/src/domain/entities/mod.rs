//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod product;
pub mod user;

pub use product::{Category, Product, ProductId};
pub use user::{ArtistStats, ArtistSummary, User, UserId, UserType};
