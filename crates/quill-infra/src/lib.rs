//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! the SeaORM-backed data access layer plus JWT and Argon2 auth services.

pub mod auth;
pub mod database;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{BlogStore, StoreConfig, connect};
pub use sea_orm::DbErr;
