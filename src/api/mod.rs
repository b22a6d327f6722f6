//! Request/response layer for the Community Flow backend.
//!
//! This module owns the HTTP contract: endpoint paths, query serialization,
//! wire types, and error normalization.

mod client;
mod types;

pub use self::client::{ApiClient, DETAIL_ARTICLE_LIMIT};
pub use self::types::*;
