//! Storage-level error types.

use thiserror::Error;

/// Errors surfaced by the data access layer.
///
/// The store never catches-and-suppresses: a failed statement in a
/// multi-statement operation propagates as-is, leaving whatever the earlier
/// statements already committed (no automatic rollback).
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),
}
