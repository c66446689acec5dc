//! # Quill Core
//!
//! The domain layer of the Quill blogging API.
//! This crate contains pure domain types and ports with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::RepoError;
