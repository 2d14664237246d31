use crate::error::Result;
use crate::flatten::flatten;
use crate::normalize::{normalize, NormalizeOutcome};
use crate::storage::ScheduleSink;
use crate::types::CatalogSource;
use serde::Serialize;
use tracing::{info, instrument, warn};

/// Result of a complete pipeline run
#[derive(Debug, Serialize)]
pub struct PipelineResult {
    pub term: String,
    pub courses: usize,
    pub sections: usize,
    pub rows_loaded: usize,
    pub rows_dropped: usize,
    pub table: String,
}

pub struct Pipeline;

impl Pipeline {
    /// Fetch a term's catalog and run it through flatten + normalize
    /// without persisting anything. Returns the course count alongside
    /// the normalization outcome.
    #[instrument(skip(source))]
    pub async fn transform(
        source: &dyn CatalogSource,
        term: &str,
    ) -> Result<(usize, NormalizeOutcome)> {
        let document = source.fetch_catalog(term).await?;
        let courses = document.courses.len();
        info!("Fetched {} courses from {}", courses, source.source_name());

        let records = flatten(&document)?;
        info!("Flattened {} section records", records.len());

        let outcome = normalize(&records);
        if outcome.dropped > 0 {
            warn!(
                "Dropped {} of {} records with no usable time window",
                outcome.dropped, outcome.considered
            );
        }

        Ok((courses, outcome))
    }

    /// Run the complete pipeline for a term and load the result into the
    /// sink's destination table
    #[instrument(skip(source, sink))]
    pub async fn run(
        source: &dyn CatalogSource,
        sink: &dyn ScheduleSink,
        term: &str,
        table: &str,
    ) -> Result<PipelineResult> {
        let (courses, outcome) = Self::transform(source, term).await?;
        let sections = outcome.considered;

        sink.replace_table(table, &outcome.rows).await?;

        Ok(PipelineResult {
            term: term.to_string(),
            courses,
            sections,
            rows_loaded: outcome.rows.len(),
            rows_dropped: outcome.dropped,
            table: table.to_string(),
        })
    }
}
