use serde::Deserialize;
use serde_json::Value;

/// A term's catalog document as published by the gt-scheduler crawler.
///
/// Courses map a course identifier ("CS 1331") to a two-element tuple of
/// display name and sections mapping; sections and meetings are
/// fixed-position tuples that reference the shared `caches` tables by
/// integer index. The tuples are kept as raw JSON here and decoded
/// positionally by the flattener, which owns the shape checks.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogDocument {
    pub courses: serde_json::Map<String, Value>,
    pub caches: Caches,
}

/// Shared lookup tables referenced by index from course records.
///
/// The crawler publishes more tables than these (grade bases, final exam
/// blocks); unknown fields are ignored on decode.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Caches {
    /// Human-readable time ranges, "HHMM - HHMM" or empty
    pub periods: Vec<String>,
    /// Building coordinates; opaque to the pipeline
    pub locations: Vec<Value>,
    /// "YYYY-MM-DD - YYYY-MM-DD"
    pub date_ranges: Vec<String>,
    pub schedule_types: Vec<String>,
    pub campuses: Vec<String>,
    pub attributes: Vec<String>,
}
