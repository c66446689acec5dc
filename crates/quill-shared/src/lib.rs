//! # Quill Shared
//!
//! Wire types shared between the server and API clients: request bodies,
//! response envelopes, and the uniform error payload.

pub mod dto;
pub mod response;

pub use response::ErrorBody;
