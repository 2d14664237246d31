use crate::document::CatalogDocument;
use crate::error::Result;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// First scheduled meeting block of a section, resolved against the
/// document caches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    /// "HHMM - HHMM", or empty when the section has no fixed time
    pub time: String,
    /// Weekday letters drawn from {M,T,W,R,F}
    pub day_codes: String,
    /// Building name plus trailing room token, e.g. "Clough G25"
    pub building_raw: String,
    /// Building coordinates, passed through untouched
    pub location: Value,
    pub professors: Vec<String>,
    /// "YYYY-MM-DD - YYYY-MM-DD"
    pub date_range: String,
}

/// One denormalized record per course x section.
///
/// `meeting` is `Some` only when the section has at least one meeting
/// block; a section without meetings carries no meeting-derived fields at
/// all rather than a sub-record full of blanks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatRecord {
    pub crn: String,
    pub course_id: String,
    pub display_name: String,
    pub section_id: String,
    pub credits: f64,
    pub schedule_type: String,
    pub campus: String,
    pub attributes: Vec<String>,
    pub meeting: Option<Meeting>,
}

/// Final tabular row, one per section-meeting that survived cleaning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRow {
    pub crn: String,
    pub course_id: String,
    pub display_name: String,
    pub section_id: String,
    pub credits: f64,
    pub schedule_type: String,
    pub campus: String,
    /// Building name with the trailing room token stripped; absent when
    /// the raw value does not match the expected pattern
    pub building: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
}

/// Core trait for anything that can produce a term's catalog document
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Unique identifier for this source
    fn source_name(&self) -> &'static str;

    /// Fetch and decode the catalog document for a term code
    async fn fetch_catalog(&self, term: &str) -> Result<CatalogDocument>;
}
