//! Georgia Tech course catalog ETL: fetch a term's reference-compressed
//! catalog document, flatten it into one record per course section, clean
//! it into a rectangular schedule table, and load it into SQLite.

pub mod config;
pub mod constants;
pub mod db;
pub mod document;
pub mod error;
pub mod flatten;
pub mod logging;
pub mod normalize;
pub mod pipeline;
pub mod source;
pub mod storage;
pub mod types;

// Re-export the shapes most callers need
pub use document::{Caches, CatalogDocument};
pub use types::{FlatRecord, Meeting, NormalizedRow};
