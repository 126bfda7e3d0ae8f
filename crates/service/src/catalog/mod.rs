//! Book catalog: domain types and the JSON-file-backed store.

pub mod domain;
pub mod store;

pub use domain::{Book, Review};
pub use store::CatalogStore;
