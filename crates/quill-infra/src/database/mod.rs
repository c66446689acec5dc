//! Database connection management and the data access layer.

mod connect;
pub mod entity;
mod store;

pub use connect::{StoreConfig, connect};
pub use store::BlogStore;

#[cfg(test)]
mod tests;
